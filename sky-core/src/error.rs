use thiserror::Error;

use crate::model::WeatherRecord;

/// Result of a single weather fetch.
pub type RequestOutcome = Result<WeatherRecord, RequestError>;

/// Every way a fetch can fail. This set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Transport failure, or a response that is not HTTP 200.
    #[error("weather request failed")]
    FailedRequest,
    /// HTTP 200, but the body could not be decoded.
    #[error("weather service returned an invalid response")]
    InvalidResponse,
    /// No transport error, but no body either.
    #[error("weather request finished without a response body")]
    Unknown,
}

/// Raised while building a client, before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base endpoint '{0}': {1}")]
    InvalidEndpoint(String, url::ParseError),
    #[error("base endpoint '{0}' cannot take path segments")]
    CannotBeABase(String),
}
