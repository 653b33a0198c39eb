//! HTTP transport to the Docker Engine
//!
//! The client talks to the Engine through [`EngineTransport`] so tests can
//! swap the network for a scripted double.

use crate::{EngineError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;

/// HTTP methods used against the Engine API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Raw Engine reply: status line and body text
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl EngineResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text(status),
            body: body.into(),
        }
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The `message` field the Engine puts in error bodies
    pub fn engine_message(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }

        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.is_empty())
    }

    /// Fail unless the status is one of `expected`
    pub fn expect_status(&self, expected: &[u16]) -> Result<()> {
        if expected.contains(&self.status) {
            return Ok(());
        }
        Err(EngineError::UnexpectedStatus {
            status: self.status,
            message: self
                .engine_message()
                .unwrap_or_else(|| self.status_text.clone()),
        })
    }
}

/// Canonical reason phrase for a status code, empty when unknown
pub fn status_text(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// Sends one request to the Engine and returns its reply.
///
/// Implementations report connection-level failures as
/// [`EngineError::Connection`]; any HTTP status, including errors, is a
/// successful send.
#[async_trait]
pub trait EngineTransport: Send + Sync {
    async fn send(&self, method: Method, url: &Url) -> Result<EngineResponse>;
}

/// Production transport over `reqwest`
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl EngineTransport for HttpTransport {
    async fn send(&self, method: Method, url: &Url) -> Result<EngineResponse> {
        let request = match method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
            Method::Delete => self.client.delete(url.clone()),
        };

        let response = request
            .send()
            .await
            .map_err(|e| EngineError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EngineError::Connection(e.to_string()))?;

        Ok(EngineResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
