use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderMap};
use thiserror::Error;
use url::Url;

/// What the transport handed back for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// `None` when the reply was not a well-formed HTTP response.
    pub status: Option<StatusCode>,
    /// `None` when no body was delivered. Empty bodies are reported as `None`.
    pub body: Option<Vec<u8>>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            status: Some(status),
            body: (!body.is_empty()).then_some(body),
        }
    }
}

/// Any failure surfaced by the transport layer (DNS, TLS, connect, read...).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// HTTP collaborator used by [`crate::WeatherRequestClient`].
///
/// Implementations issue exactly one GET per call and report exactly one result.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<TransportResponse, TransportError>;
}

/// Default transport backed by `reqwest`.
///
/// Timeouts, proxies and TLS settings belong to the wrapped `Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<TransportResponse, TransportError> {
        let res = self.http.get(url).headers(headers).send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_reported_as_absent() {
        let res = TransportResponse::new(StatusCode::OK, Vec::new());
        assert_eq!(res.status, Some(StatusCode::OK));
        assert!(res.body.is_none());
    }

    #[test]
    fn non_empty_body_is_kept() {
        let res = TransportResponse::new(StatusCode::NOT_FOUND, "{}");
        assert_eq!(res.body.as_deref(), Some(&b"{}"[..]));
    }
}
