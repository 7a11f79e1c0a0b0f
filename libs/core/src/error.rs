use http::StatusCode;
use thiserror::Error;

/// Failures raised by a single webhook send.
///
/// Only [`NotifyError::Transport`] is worth retrying; everything else points at
/// operator misconfiguration or a message the provider will keep rejecting.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("connection `{connection}` is misconfigured: {reason}")]
    Configuration { connection: String, reason: String },
    #[error("WeCom webhook only supports {supported} so far, but received `{received}`")]
    Validation { received: String, supported: String },
    #[error("send WeCom message failed, received: {body}")]
    Delivery { errcode: Option<i64>, body: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("payload serialization failed: {0}")]
    Serialization(String),
    #[error("template rendering failed: {0}")]
    Template(String),
    #[error("credential store error: {0}")]
    Store(String),
}

impl NotifyError {
    pub fn missing_key(connection: impl Into<String>) -> Self {
        Self::Configuration {
            connection: connection.into(),
            reason: "missing webhook key, put the robot key in the password field of the connection"
                .into(),
        }
    }

    pub fn unknown_connection(connection: impl Into<String>) -> Self {
        Self::Configuration {
            connection: connection.into(),
            reason: "connection not found".into(),
        }
    }

    /// Short machine-readable code, used as a log field and metric label.
    pub fn code(&self) -> &'static str {
        match self {
            NotifyError::Configuration { .. } => "wecom_configuration",
            NotifyError::Validation { .. } => "wecom_validation",
            NotifyError::Delivery { .. } => "wecom_delivery",
            NotifyError::Transport(_) => "wecom_transport",
            NotifyError::Serialization(_) => "wecom_serialization",
            NotifyError::Template(_) => "wecom_template",
            NotifyError::Store(_) => "wecom_store",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, NotifyError::Transport(_))
    }
}

/// Network-level failures reported by an [`crate::HttpTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("http status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid http request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Request(Box::new(err))
    }
}

pub type NotifyResult<T> = Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_retryable() {
        let status = NotifyError::from(TransportError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream".into(),
        });
        assert!(status.is_retryable());
        assert_eq!(status.code(), "wecom_transport");
        assert!(!NotifyError::missing_key("wechat_default").is_retryable());
        assert!(
            !NotifyError::Delivery {
                errcode: Some(93000),
                body: "{}".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn configuration_errors_name_the_connection() {
        let err = NotifyError::missing_key("ops_robot");
        let text = err.to_string();
        assert!(text.contains("ops_robot"));
        assert!(text.contains("missing webhook key"));
    }
}
