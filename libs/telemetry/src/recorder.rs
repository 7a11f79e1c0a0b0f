use crate::context::TelemetryLabels;
use metrics::Label;
use tracing::Span;

/// Fills the `connection`, `task_id` and `run_id` fields declared on `span`.
pub fn with_common_fields(span: &Span, labels: &TelemetryLabels) {
    if let Some(connection) = &labels.connection {
        span.record("connection", tracing::field::display(connection));
    }
    if let Some(task_id) = &labels.task_id {
        span.record("task_id", tracing::field::display(task_id));
    }
    if let Some(run_id) = &labels.run_id {
        span.record("run_id", tracing::field::display(run_id));
    }
}

pub fn record_counter(name: &'static str, value: u64, labels: &TelemetryLabels) {
    metrics::counter!(name, to_labels(labels)).increment(value);
}

pub fn record_histogram(name: &'static str, value: f64, labels: &TelemetryLabels) {
    metrics::histogram!(name, to_labels(labels)).record(value);
}

fn to_labels(labels: &TelemetryLabels) -> Vec<Label> {
    labels
        .tags()
        .into_iter()
        .map(|(key, value)| Label::new(key, value))
        .collect()
}
