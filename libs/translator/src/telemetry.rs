use wecom_core::{MessageType, NotifyResult};
use wecom_telemetry::{MessageContext, TelemetryLabels, record_counter};

const TRANSLATE_SPAN_NAME: &str = "translate.run";
const TRANSLATE_COUNTER: &str = "wecom_messages_translated";

pub fn translate_with_span<T, F>(kind: MessageType, f: F) -> NotifyResult<T>
where
    F: FnOnce() -> NotifyResult<T>,
{
    let ctx = MessageContext::new(TelemetryLabels::new().with_msgtype(kind.as_str()));
    let span = tracing::debug_span!(TRANSLATE_SPAN_NAME, msgtype = %kind);
    let _guard = span.enter();
    let result = f();
    if result.is_ok() {
        record_counter(TRANSLATE_COUNTER, 1, &ctx.labels);
    }
    result
}
