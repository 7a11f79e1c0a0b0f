use serde_json::{Value, json};
use wecom_core::{MessageType, NotifyError, OutboundMessage};
use wecom_translator::{Translator, WecomTranslator, build_message, build_message_body};

#[test]
fn every_supported_type_reports_its_msgtype() {
    for kind in MessageType::ALL {
        let content = match kind {
            MessageType::Text => json!("hello"),
            _ => json!({"title": "t"}),
        };
        let msg = OutboundMessage::new(kind.as_str(), content);
        let body = build_message_body(&msg).expect("body");
        let parsed: Value = serde_json::from_str(&body).expect("valid json");
        assert_eq!(parsed["msgtype"], kind.as_str());
        assert!(parsed.get(kind.as_str()).is_some(), "missing {kind} key");
    }
}

#[test]
fn text_payload_with_mentions() {
    let msg = OutboundMessage::text("hello")
        .with_at_mobiles(["123"])
        .with_at_all(true);
    let payload = build_message(&msg).unwrap();
    assert_eq!(
        payload,
        json!({
            "msgtype": "text",
            "text": {"content": "hello"},
            "at": {"atMobiles": ["123"], "isAtAll": true}
        })
    );
}

#[test]
fn link_payload_has_no_at_block() {
    let msg = OutboundMessage::new("link", json!({"title": "t", "text": "x", "url": "u"}));
    let payload = build_message(&msg).unwrap();
    assert_eq!(
        payload,
        json!({"msgtype": "link", "link": {"title": "t", "text": "x", "url": "u"}})
    );
}

#[test]
fn card_kinds_ignore_mentions() {
    for kind in ["actionCard", "feedCard"] {
        let msg = OutboundMessage::new(kind, json!({"links": []}))
            .with_at_mobiles(["13800000000"])
            .with_at_all(true);
        let payload = build_message(&msg).unwrap();
        let object = payload.as_object().unwrap();
        assert!(!object.contains_key("at"));
        assert_eq!(object.len(), 2);
        assert_eq!(payload[kind], json!({"links": []}));
    }
}

#[test]
fn unsupported_type_is_rejected() {
    let msg = OutboundMessage::new("foo", json!("hello"));
    let err = build_message(&msg).unwrap_err();
    match err {
        NotifyError::Validation { received, supported } => {
            assert_eq!(received, "foo");
            assert!(supported.contains("actionCard"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_object_matches_free_function() {
    let msg = OutboundMessage::text("same");
    let translator: &dyn Translator = &WecomTranslator::new();
    assert_eq!(translator.to_platform(&msg).unwrap(), build_message(&msg).unwrap());
}
