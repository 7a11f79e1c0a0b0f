use super::{HttpTransport, RawRequest, RawResponse, TransportConfig};
use crate::error::TransportError;
use async_trait::async_trait;

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        let (parts, body) = request.into_parts();
        tracing::debug!(method = %parts.method, path = %parts.uri.path(), "dispatching http request");
        let res = self
            .http
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()
            .await?;

        let status = res.status();
        let headers = res.headers().clone();
        let body = res.bytes().await?;
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
