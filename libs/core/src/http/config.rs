use std::env;
use std::time::Duration;

/// Settings for the reqwest-backed transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-request timeout; `None` keeps reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl TransportConfig {
    /// Reads `WECOM_HTTP_TIMEOUT_SECS` and `WECOM_HTTP_USER_AGENT`.
    pub fn from_env() -> Self {
        let timeout = env::var("WECOM_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| parse_timeout(&v));
        let user_agent = env::var("WECOM_HTTP_USER_AGENT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_user_agent);
        Self {
            timeout,
            user_agent,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn default_user_agent() -> String {
    format!("wecom-notify/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_timeout(value: &str) -> Option<Duration> {
    match value.trim().parse::<f64>() {
        Ok(secs) if secs > 0.0 && secs.is_finite() => Some(Duration::from_secs_f64(secs)),
        _ => None,
    }
}
