use std::sync::Arc;

use reqwest::{
    StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tokio::{
    runtime::{Handle, TryCurrentError},
    task::JoinHandle,
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::Config,
    error::{ConfigError, RequestError, RequestOutcome},
    model::{Coordinate, WeatherRecord},
    transport::{ReqwestTransport, Transport, TransportError, TransportResponse},
};

/// Fetches weather records for coordinates from a fixed, pre-authenticated endpoint.
///
/// Each [`fetch`](Self::fetch) issues exactly one GET to `{base}/{lat}, {lon}` and
/// resolves to exactly one [`RequestOutcome`]. There are no retries and no timeout
/// of its own; timeout policy lives on the transport. The client holds no per-call
/// state, so clones can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct WeatherRequestClient {
    base: Url,
    transport: Arc<dyn Transport>,
}

impl WeatherRequestClient {
    /// Client using the default `reqwest` transport.
    pub fn new(base: Url) -> Result<Self, ConfigError> {
        Self::with_transport(base, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(base: Url, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        if base.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(base.to_string()));
        }

        Ok(Self { base, transport })
    }

    pub fn parse(base: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base).map_err(|e| ConfigError::InvalidEndpoint(base.to_string(), e))?;
        Self::new(url)
    }

    /// Build a client for the authenticated endpoint stored in `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let url = config.authenticated_url()?;
        Ok(Self::new(url)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Endpoint for `coordinate`: the base with one extra path segment.
    pub fn request_url(&self, coordinate: Coordinate) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&coordinate.path_segment());
        }
        url
    }

    pub async fn fetch(&self, coordinate: Coordinate) -> RequestOutcome {
        let url = self.request_url(coordinate);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        debug!(%coordinate, "requesting weather data");
        let result = self.transport.get(url, headers).await;

        resolve(result)
    }

    /// Fetch in the background and hand the outcome to `completion`.
    ///
    /// `completion` runs exactly once, on a runtime worker rather than the caller's
    /// thread; callers that care about the executing context must redispatch.
    ///
    /// Spawns onto the current Tokio runtime. Outside a runtime this returns
    /// [`TryCurrentError`], no request is made and `completion` is never called.
    pub fn fetch_with<F>(&self, coordinate: Coordinate, completion: F) -> Result<JoinHandle<()>, TryCurrentError>
    where
        F: FnOnce(RequestOutcome) + Send + 'static,
    {
        let handle = Handle::try_current()?;
        let client = self.clone();
        Ok(handle.spawn(async move {
            let outcome = client.fetch(coordinate).await;
            completion(outcome);
        }))
    }
}

/// Map a raw transport result to an outcome. First matching rule wins.
pub fn resolve(result: Result<TransportResponse, TransportError>) -> RequestOutcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "weather request failed in transport");
            return Err(RequestError::FailedRequest);
        }
    };

    let Some(body) = response.body else {
        warn!(status = ?response.status, "weather response had no body");
        return Err(RequestError::Unknown);
    };

    if response.status != Some(StatusCode::OK) {
        warn!(status = ?response.status, "weather request returned non-200 status");
        return Err(RequestError::FailedRequest);
    }

    serde_json::from_slice::<WeatherRecord>(&body).map_err(|err| {
        warn!(error = %err, "failed to decode weather response");
        RequestError::InvalidResponse
    })
}
