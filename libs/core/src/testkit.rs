//! Scripted transport for exercising clients without a network.

use crate::error::TransportError;
use crate::http::{HttpTransport, RawRequest, RawResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|err| {
            panic!(
                "request body is not json: {err}: {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }
}

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, status: StatusCode, body: Value) -> Self {
        self.with_body(status, body.to_string())
    }

    pub fn with_body(self, status: StatusCode, body: impl Into<Bytes>) -> Self {
        self.push(Ok(RawResponse::new(status, body)))
    }

    pub fn with_error(self, err: TransportError) -> Self {
        self.push(Err(err))
    }

    fn push(self, response: Result<RawResponse, TransportError>) -> Self {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock poisoned").len()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        let (parts, body) = request.into_parts();
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(RecordedRequest {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body,
            });
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::InvalidRequest(
                    "no scripted response left".into(),
                ))
            })
    }
}
