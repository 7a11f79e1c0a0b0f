//! Core contracts for the WeCom webhook notifier.
//!
//! This crate holds the message and connection data model, the error taxonomy,
//! the credential stores used to resolve robot keys, and the HTTP transport seam
//! the egress client sends through.
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
pub mod types;

pub use credentials::*;
pub use endpoint::*;
pub use error::*;
pub use self::http::*;
pub use types::*;
