//! Transport seam between the webhook client and the network.

mod client;
mod config;

pub use client::ReqwestTransport;
pub use config::TransportConfig;

use crate::error::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub type RawRequest = Request<Bytes>;

/// Executes a fully built HTTP request. Implementations return every response
/// they receive, whatever its status; only failures to obtain a response are
/// errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: RawRequest) -> Result<RawResponse, TransportError>;
}

pub type SharedTransport = Arc<dyn HttpTransport>;

/// Builds a `POST` carrying `body` with `Content-Type: application/json`.
pub fn json_post(url: &str, body: impl Into<Bytes>) -> Result<RawRequest, TransportError> {
    Request::builder()
        .method(Method::POST)
        .uri(url)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(body.into())
        .map_err(|err| TransportError::InvalidRequest(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_post_sets_method_and_content_type() {
        let req = json_post("https://example.com/hook?key=1", r#"{"a":1}"#).unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.uri().query(), Some("key=1"));
        assert_eq!(&req.body()[..], br#"{"a":1}"#);
    }

    #[test]
    fn json_post_rejects_malformed_uri() {
        let err = json_post("http://bad host/", "{}").unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn response_text_is_lossy() {
        let res = RawResponse::new(StatusCode::OK, vec![b'o', b'k', 0xff]);
        assert_eq!(res.text(), "ok\u{fffd}");
    }
}
