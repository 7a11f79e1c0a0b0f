//! WeCom group robot egress: a webhook client and the pipeline task that
//! drives it.

pub mod client;
pub mod context;
pub mod task;
pub mod template;

pub use client::WecomClient;
pub use context::RunContext;
pub use task::{DEFAULT_CONNECTION, NotifyTaskParams, Task, WecomNotifyTask};
pub use template::render_message;
