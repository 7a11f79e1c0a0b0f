use handlebars::Handlebars;
use serde_json::Value;
use std::sync::OnceLock;
use wecom_core::{NotifyError, NotifyResult, OutboundMessage};

use crate::context::RunContext;

static REGISTRY: OnceLock<Handlebars<'static>> = OnceLock::new();

fn hb_registry() -> &'static Handlebars<'static> {
    REGISTRY.get_or_init(|| {
        let mut h = Handlebars::new();
        h.register_escape_fn(handlebars::no_escape);
        h
    })
}

/// Renders every string inside the message content as a template against
/// `ctx`. Object keys, mentions and the message type are left untouched.
pub fn render_message(msg: &OutboundMessage, ctx: &RunContext) -> NotifyResult<OutboundMessage> {
    let data = ctx.template_data();
    let content = render_value(hb_registry(), &msg.content, &data)?;
    Ok(OutboundMessage {
        content,
        ..msg.clone()
    })
}

fn render_value(hbs: &Handlebars<'static>, value: &Value, data: &Value) -> NotifyResult<Value> {
    match value {
        Value::String(text) if text.contains("{{") => hbs
            .render_template(text, data)
            .map(Value::String)
            .map_err(|err| NotifyError::Template(err.to_string())),
        Value::Array(items) => items
            .iter()
            .map(|item| render_value(hbs, item, data))
            .collect::<NotifyResult<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), render_value(hbs, item, data)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RunContext {
        RunContext::new("notify_ops", "scheduled__2024-05-01")
            .with_var("ds", "2024-05-01")
            .with_var("owner", "<ops>")
    }

    #[test]
    fn registry_is_built_once() {
        assert!(std::ptr::eq(hb_registry(), hb_registry()));
    }

    #[test]
    fn renders_plain_text_content() {
        let msg = OutboundMessage::text("run {{run_id}} of {{task_id}} on {{ds}}");
        let rendered = render_message(&msg, &ctx()).unwrap();
        assert_eq!(
            rendered.content,
            json!("run scheduled__2024-05-01 of notify_ops on 2024-05-01")
        );
    }

    #[test]
    fn renders_nested_strings_without_html_escaping() {
        let msg = OutboundMessage::new(
            "link",
            json!({"title": "{{owner}}", "text": "static", "picUrl": null, "tags": ["{{ds}}"]}),
        );
        let rendered = render_message(&msg, &ctx()).unwrap();
        assert_eq!(
            rendered.content,
            json!({"title": "<ops>", "text": "static", "picUrl": null, "tags": ["2024-05-01"]})
        );
    }

    #[test]
    fn unknown_variables_render_empty() {
        let msg = OutboundMessage::text("[{{missing}}]");
        let rendered = render_message(&msg, &ctx()).unwrap();
        assert_eq!(rendered.content, json!("[]"));
    }

    #[test]
    fn malformed_template_is_a_template_error() {
        let msg = OutboundMessage::text("{{#if}}");
        let err = render_message(&msg, &ctx()).unwrap_err();
        assert!(matches!(err, NotifyError::Template(_)));
    }

    #[test]
    fn mentions_and_type_are_preserved() {
        let msg = OutboundMessage::text("{{ds}}")
            .with_at_mobiles(["123"])
            .with_at_all(true);
        let rendered = render_message(&msg, &ctx()).unwrap();
        assert_eq!(rendered.message_type, "text");
        assert_eq!(rendered.at_mobiles, msg.at_mobiles);
        assert!(rendered.at_all);
    }
}
