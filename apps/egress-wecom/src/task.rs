use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Instrument;
use wecom_core::{NotifyResult, OutboundMessage, SharedCredentialStore, SharedTransport};
use wecom_telemetry::{MessageContext, TelemetryLabels, task_span};

use crate::client::WecomClient;
use crate::context::RunContext;
use crate::template::render_message;

pub const DEFAULT_CONNECTION: &str = "wechat_default";

/// Entry point the orchestrator invokes once per task run.
#[async_trait]
pub trait Task: Send + Sync {
    async fn execute(&self, ctx: &RunContext) -> NotifyResult<()>;
}

/// Task parameters as configured in a pipeline definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyTaskParams {
    #[serde(default = "default_connection")]
    pub connection_name: String,
    #[serde(default = "default_message_type")]
    pub message_type: String,
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub at_mobiles: Option<Vec<String>>,
    #[serde(default)]
    pub at_all: bool,
}

fn default_connection() -> String {
    DEFAULT_CONNECTION.to_string()
}

fn default_message_type() -> String {
    "text".to_string()
}

impl Default for NotifyTaskParams {
    fn default() -> Self {
        Self {
            connection_name: default_connection(),
            message_type: default_message_type(),
            message: Value::Null,
            at_mobiles: None,
            at_all: false,
        }
    }
}

impl NotifyTaskParams {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: Value::String(message.into()),
            ..Self::default()
        }
    }

    pub fn to_message(&self) -> OutboundMessage {
        OutboundMessage {
            message_type: self.message_type.clone(),
            content: self.message.clone(),
            at_mobiles: self.at_mobiles.clone(),
            at_all: self.at_all,
        }
    }
}

/// Pipeline task that posts one WeCom message per execution.
#[derive(Debug, Clone)]
pub struct WecomNotifyTask {
    client: WecomClient,
}

impl WecomNotifyTask {
    pub fn new(
        params: NotifyTaskParams,
        credentials: SharedCredentialStore,
        transport: SharedTransport,
    ) -> Self {
        let message = params.to_message();
        Self {
            client: WecomClient::new(params.connection_name, message, credentials, transport),
        }
    }

    pub fn connection(&self) -> &str {
        self.client.connection()
    }

    async fn run(&self, ctx: &RunContext) -> NotifyResult<()> {
        tracing::info!("Sending WeCom message.");
        let message = render_message(self.client.message(), ctx)?;
        self.client.with_message(message).send().await?;
        Ok(())
    }
}

#[async_trait]
impl Task for WecomNotifyTask {
    async fn execute(&self, ctx: &RunContext) -> NotifyResult<()> {
        let labels = TelemetryLabels::new()
            .with_connection(self.client.connection())
            .with_run(ctx.task_id.clone(), ctx.run_id.clone());
        let span = task_span(&MessageContext::new(labels));
        self.run(ctx).instrument(span).await
    }
}
