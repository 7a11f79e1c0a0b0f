//! Helpers for translating caller messages into WeCom webhook payloads.
//!
//! The main entry point is [`build_message`]; the [`Translator`] trait exposes
//! the same conversion behind an object for callers that select a payload
//! shape at runtime.

use serde_json::Value;
use wecom_core::{NotifyResult, OutboundMessage};

mod telemetry;
pub mod wecom;

pub use wecom::{build_message, build_message_body};

/// Converts an [`OutboundMessage`] into the provider payload.
///
/// Implementations never mutate the message and must reject unsupported
/// message types before anything is sent.
pub trait Translator: Send + Sync {
    fn to_platform(&self, msg: &OutboundMessage) -> NotifyResult<Value>;
}

/// Translator producing WeCom group robot payloads.
///
/// ```
/// use wecom_core::OutboundMessage;
/// use wecom_translator::{Translator, WecomTranslator};
///
/// let payload = WecomTranslator::new()
///     .to_platform(&OutboundMessage::text("hello"))
///     .unwrap();
/// assert_eq!(payload["msgtype"], "text");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct WecomTranslator;

impl WecomTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for WecomTranslator {
    fn to_platform(&self, msg: &OutboundMessage) -> NotifyResult<Value> {
        build_message(msg)
    }
}
