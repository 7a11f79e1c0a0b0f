//! Logging and metrics helpers shared by the WeCom notifier crates.
//! Provides subscriber installation, span constructors, and label-aware
//! recorders on top of the `metrics` facade.

use anyhow::Result;
use tracing::Span;

mod config;
mod context;
mod recorder;
mod tracing_init;

pub use config::TelemetryConfig;
pub use context::{MessageContext, TelemetryLabels};
pub use recorder::{record_counter, record_histogram, with_common_fields};
pub use tracing_init::init_telemetry;

/// Installs the subscriber configured from `RUST_LOG` and `LOG_FORMAT`.
pub fn install(service_name: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(service_name))
}

/// Span covering one task execution, from rendering to delivery.
pub fn task_span(ctx: &MessageContext) -> Span {
    let span = tracing::info_span!(
        "wecom.task",
        connection = tracing::field::Empty,
        task_id = tracing::field::Empty,
        run_id = tracing::field::Empty
    );
    with_common_fields(&span, &ctx.labels);
    span
}

/// Span covering a single webhook POST.
pub fn send_span(ctx: &MessageContext) -> Span {
    let msgtype = ctx.labels.msgtype.as_deref().unwrap_or("unknown");
    let span = tracing::info_span!(
        "wecom.send",
        msgtype = %msgtype,
        connection = tracing::field::Empty,
        task_id = tracing::field::Empty,
        run_id = tracing::field::Empty
    );
    with_common_fields(&span, &ctx.labels);
    span
}
