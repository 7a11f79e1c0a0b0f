use crate::error::{NotifyError, NotifyResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Message kinds accepted by the WeCom group robot webhook.
///
/// ```
/// use wecom_core::MessageType;
///
/// let kind: MessageType = "actionCard".parse().unwrap();
/// assert_eq!(kind, MessageType::ActionCard);
/// assert_eq!(kind.as_str(), "actionCard");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MessageType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "actionCard")]
    ActionCard,
    #[serde(rename = "feedCard")]
    FeedCard,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::Text,
        MessageType::Link,
        MessageType::Markdown,
        MessageType::ActionCard,
        MessageType::FeedCard,
    ];

    /// Wire name used both as `msgtype` and as the payload key.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Link => "link",
            MessageType::Markdown => "markdown",
            MessageType::ActionCard => "actionCard",
            MessageType::FeedCard => "feedCard",
        }
    }

    /// Whether the payload carries an `at` block.
    pub fn supports_mentions(&self) -> bool {
        matches!(self, MessageType::Text | MessageType::Markdown)
    }

    /// Renders the supported set as `[text, link, ...]` for error messages.
    pub fn supported_list() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(MessageType::as_str).collect();
        format!("[{}]", names.join(", "))
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = NotifyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| NotifyError::Validation {
                received: value.to_string(),
                supported: MessageType::supported_list(),
            })
    }
}

/// A message as handed over by the caller, before it is validated and shaped
/// into the provider payload.
///
/// `message_type` stays a plain string so that an unsupported value is
/// reported at send time rather than lost during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboundMessage {
    pub message_type: String,
    pub content: Value,
    #[serde(default)]
    pub at_mobiles: Option<Vec<String>>,
    #[serde(default)]
    pub at_all: bool,
}

impl OutboundMessage {
    pub fn new(message_type: impl Into<String>, content: impl Into<Value>) -> Self {
        Self {
            message_type: message_type.into(),
            content: content.into(),
            at_mobiles: None,
            at_all: false,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(MessageType::Text.as_str(), Value::String(content.into()))
    }

    pub fn with_at_mobiles<I, S>(mut self, mobiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.at_mobiles = Some(mobiles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_at_all(mut self, at_all: bool) -> Self {
        self.at_all = at_all;
        self
    }

    /// Parses `message_type`, failing with a validation error when unsupported.
    pub fn kind(&self) -> NotifyResult<MessageType> {
        self.message_type.parse()
    }
}

/// Parsed reply of the webhook endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    pub errcode: i64,
    pub errmsg: Option<String>,
    pub raw: String,
}

impl WebhookResponse {
    /// Interprets a response body. Anything other than a JSON object with a
    /// numeric `errcode` of zero is a delivery failure carrying the raw text.
    pub fn from_body(raw: String) -> NotifyResult<Self> {
        let parsed: Option<Value> = serde_json::from_str(&raw).ok();
        let errcode = parsed
            .as_ref()
            .and_then(|value| value.get("errcode"))
            .and_then(errcode_as_i64);
        match errcode {
            Some(0) => {
                let errmsg = parsed
                    .as_ref()
                    .and_then(|value| value.get("errmsg"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Self {
                    errcode: 0,
                    errmsg,
                    raw,
                })
            }
            errcode => Err(NotifyError::Delivery { errcode, body: raw }),
        }
    }
}

fn errcode_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
