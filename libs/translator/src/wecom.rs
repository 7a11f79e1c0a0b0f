//! Shapes [`OutboundMessage`] values into WeCom group robot payloads.

use crate::telemetry::translate_with_span;
use serde_json::{Map, Value, json};
use wecom_core::{MessageType, NotifyError, NotifyResult, OutboundMessage};

/// Builds the JSON payload for `msg`.
///
/// `text` content is wrapped as `{"content": ...}`; every other kind carries
/// the caller's content untouched under its own key. Only `text` and
/// `markdown` get an `at` block.
///
/// ```
/// use serde_json::json;
/// use wecom_core::OutboundMessage;
/// use wecom_translator::build_message;
///
/// let payload = build_message(&OutboundMessage::text("deploy finished")).unwrap();
/// assert_eq!(payload["msgtype"], "text");
/// assert_eq!(payload["text"], json!({"content": "deploy finished"}));
/// ```
pub fn build_message(msg: &OutboundMessage) -> NotifyResult<Value> {
    let kind = msg.kind()?;
    translate_with_span(kind, || Ok(payload_for(kind, msg)))
}

/// [`build_message`] serialized to the request body.
pub fn build_message_body(msg: &OutboundMessage) -> NotifyResult<String> {
    let payload = build_message(msg)?;
    serde_json::to_string(&payload).map_err(|err| NotifyError::Serialization(err.to_string()))
}

fn payload_for(kind: MessageType, msg: &OutboundMessage) -> Value {
    let mut payload = Map::new();
    payload.insert("msgtype".into(), Value::String(kind.as_str().to_string()));
    let body = match kind {
        MessageType::Text => json!({ "content": msg.content }),
        _ => msg.content.clone(),
    };
    payload.insert(kind.as_str().to_string(), body);
    if kind.supports_mentions() {
        payload.insert(
            "at".into(),
            json!({
                "atMobiles": msg.at_mobiles,
                "isAtAll": msg.at_all,
            }),
        );
    }
    Value::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_content_is_not_wrapped() {
        let msg = OutboundMessage::new("markdown", json!({"content": "**bold**"}));
        let payload = build_message(&msg).unwrap();
        assert_eq!(payload["markdown"], json!({"content": "**bold**"}));
        assert_eq!(payload["at"], json!({"atMobiles": null, "isAtAll": false}));
    }

    #[test]
    fn body_is_compact_json() {
        let msg = OutboundMessage::text("hi");
        let body = build_message_body(&msg).unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["text"]["content"], "hi");
        assert!(!body.contains('\n'));
    }
}
