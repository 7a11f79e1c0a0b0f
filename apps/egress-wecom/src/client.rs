use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use wecom_core::{
    CredentialStore, HttpTransport, NotifyError, NotifyResult, OutboundMessage,
    SharedCredentialStore, SharedTransport, TransportError, WebhookResponse, json_post,
    resolve_endpoint,
};
use wecom_telemetry::{
    MessageContext, TelemetryLabels, record_counter, record_histogram, send_span,
};
use wecom_translator::build_message_body;

const SENT_COUNTER: &str = "wecom_messages_sent_total";
const FAILED_COUNTER: &str = "wecom_messages_failed_total";
const SEND_LATENCY_HISTOGRAM: &str = "wecom_send_latency_ms";

/// Sends one message to the WeCom group robot behind a named connection.
///
/// Everything `send` needs is fixed at construction; the client keeps no
/// state between calls, so one instance may be shared across tasks.
#[derive(Clone)]
pub struct WecomClient {
    connection: String,
    message: OutboundMessage,
    credentials: SharedCredentialStore,
    transport: SharedTransport,
}

impl WecomClient {
    pub fn new(
        connection: impl Into<String>,
        message: OutboundMessage,
        credentials: SharedCredentialStore,
        transport: SharedTransport,
    ) -> Self {
        Self {
            connection: connection.into(),
            message,
            credentials,
            transport,
        }
    }

    /// Convenience constructor taking concrete store and transport values.
    pub fn from_parts<C, T>(
        connection: impl Into<String>,
        message: OutboundMessage,
        credentials: C,
        transport: T,
    ) -> Self
    where
        C: CredentialStore + 'static,
        T: HttpTransport + 'static,
    {
        Self::new(connection, message, Arc::new(credentials), Arc::new(transport))
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    pub fn message(&self) -> &OutboundMessage {
        &self.message
    }

    /// Same connection, store and transport, different message.
    pub fn with_message(&self, message: OutboundMessage) -> Self {
        Self {
            message,
            ..self.clone()
        }
    }

    /// Validates, shapes and posts the message, then checks `errcode`.
    ///
    /// Unsupported message types and missing robot keys fail before any
    /// request is made. Transport failures and non-2xx statuses surface as
    /// [`NotifyError::Transport`]; a reply without `errcode == 0` is a
    /// [`NotifyError::Delivery`] carrying the raw body.
    pub async fn send(&self) -> NotifyResult<WebhookResponse> {
        let kind = self.message.kind()?;
        let labels = TelemetryLabels::new()
            .with_connection(self.connection.clone())
            .with_msgtype(kind.as_str());
        let ctx = MessageContext::new(labels);

        let start = Instant::now();
        let result = self.deliver().instrument(send_span(&ctx)).await;
        match &result {
            Ok(_) => {
                record_counter(SENT_COUNTER, 1, &ctx.labels);
                record_histogram(
                    SEND_LATENCY_HISTOGRAM,
                    start.elapsed().as_secs_f64() * 1000.0,
                    &ctx.labels,
                );
            }
            Err(err) => {
                let mut labels = ctx.labels.clone();
                labels.extra.push(("code".into(), err.code().into()));
                record_counter(FAILED_COUNTER, 1, &labels);
            }
        }
        result
    }

    async fn deliver(&self) -> NotifyResult<WebhookResponse> {
        let body = build_message_body(&self.message)?;
        tracing::info!(
            msgtype = %self.message.message_type,
            payload = %body,
            "sending WeCom message"
        );

        let endpoint = resolve_endpoint(self.credentials.as_ref(), &self.connection).await?;
        let request = json_post(&endpoint.send_url(), body)?;
        let res = self.transport.execute(request).await?;

        let status = res.status;
        let text = res.text();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %text, "webhook returned http error");
            return Err(TransportError::Status { status, body: text }.into());
        }

        match WebhookResponse::from_body(text) {
            Ok(response) => {
                tracing::info!("WeCom message sent");
                Ok(response)
            }
            Err(err) => {
                if let NotifyError::Delivery { errcode, body } = &err {
                    tracing::warn!(errcode = ?errcode, body = %body, "WeCom rejected message");
                }
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for WecomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WecomClient")
            .field("connection", &self.connection)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;
    use wecom_core::testkit::RecordingTransport;
    use wecom_core::{ConnectionProfile, InMemoryCredentialStore};

    fn store() -> InMemoryCredentialStore {
        InMemoryCredentialStore::new().with_profile(
            "wechat_default",
            ConnectionProfile::new().with_password("robot-key"),
        )
    }

    #[tokio::test]
    async fn with_message_keeps_connection_and_transport() {
        let transport = Arc::new(
            RecordingTransport::new().with_json(StatusCode::OK, json!({"errcode": 0})),
        );
        let client = WecomClient::new(
            "wechat_default",
            OutboundMessage::text("first"),
            Arc::new(store()),
            transport.clone(),
        );
        let second = client.with_message(OutboundMessage::text("second"));
        assert_eq!(second.connection(), "wechat_default");
        second.send().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].json()["text"]["content"], "second");
    }

    #[test]
    fn debug_skips_store_and_transport() {
        let client = WecomClient::from_parts(
            "wechat_default",
            OutboundMessage::text("x"),
            store(),
            RecordingTransport::new(),
        );
        let rendered = format!("{client:?}");
        assert!(rendered.contains("wechat_default"));
        assert!(!rendered.contains("robot-key"));
    }
}
