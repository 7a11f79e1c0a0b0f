use crate::credentials::{ConnectionProfile, CredentialStore};
use crate::error::{NotifyError, NotifyResult};
use std::fmt;

/// Public WeCom API base used when a connection carries no host.
pub const DEFAULT_BASE_URL: &str = "https://qyapi.weixin.qq.com";
/// Path of the group robot send endpoint, relative to the base URL.
pub const SEND_PATH: &str = "cgi-bin/webhook/send";

/// Scheme for a bare host without an explicit `schema`.
const DEFAULT_SCHEMA: &str = "http";

/// Base URL and robot key resolved from a connection profile.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookEndpoint {
    base_url: String,
    key: String,
}

impl WebhookEndpoint {
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            key: key.into(),
        }
    }

    /// Builds the endpoint for `connection`, refusing profiles without a key.
    pub fn from_profile(connection: &str, profile: &ConnectionProfile) -> NotifyResult<Self> {
        let key = profile
            .password
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NotifyError::missing_key(connection))?;
        Ok(Self::new(base_url_for(profile), key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// `{base}/cgi-bin/webhook/send?key={key}`
    pub fn send_url(&self) -> String {
        format!(
            "{}/{}?key={}",
            self.base_url.trim_end_matches('/'),
            SEND_PATH,
            urlencoding::encode(&self.key)
        )
    }
}

impl fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookEndpoint")
            .field("base_url", &self.base_url)
            .field("key", &"***")
            .finish()
    }
}

fn base_url_for(profile: &ConnectionProfile) -> String {
    let host = match profile.host.as_deref().map(str::trim) {
        Some(host) if !host.is_empty() => host,
        _ => return DEFAULT_BASE_URL.to_string(),
    };
    if host.contains("://") {
        return host.to_string();
    }
    let schema = profile
        .schema
        .as_deref()
        .filter(|schema| !schema.is_empty())
        .unwrap_or(DEFAULT_SCHEMA);
    match profile.port {
        Some(port) => format!("{schema}://{host}:{port}"),
        None => format!("{schema}://{host}"),
    }
}

/// Looks up `connection` and resolves its webhook endpoint.
pub async fn resolve_endpoint(
    store: &dyn CredentialStore,
    connection: &str,
) -> NotifyResult<WebhookEndpoint> {
    let profile = store
        .lookup(connection)
        .await?
        .ok_or_else(|| NotifyError::unknown_connection(connection))?;
    WebhookEndpoint::from_profile(connection, &profile)
}
