//! Source traits and types

use crate::network::HttpClient;
use crate::results::SearchResult;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default bound on a single source round trip
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Why a source lookup failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Connection, DNS or TLS failure
    #[error("transport error: {0}")]
    Transport(String),
    /// The round trip exceeded the source timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The backend answered with a non-2xx status
    #[error("HTTP error: {0}")]
    Status(u16),
    /// The response body did not have the expected shape
    #[error("parse error: {0}")]
    Parse(String),
}

/// Three-way outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// At least one candidate, in the backend's order
    Results(Vec<SearchResult>),
    /// The backend answered but had no matches
    Empty,
    /// The lookup could not be completed
    Failure(SourceError),
}

impl SourceOutcome {
    /// Wrap a parsed result list, mapping an empty list to [`SourceOutcome::Empty`]
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            Self::Empty
        } else {
            Self::Results(results)
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// HTTP GET to be made by a source
#[derive(Debug, Clone)]
pub struct SourceRequest {
    /// URL to request
    pub url: String,
    /// Query parameters, encoded by the client in this order
    pub params: Vec<(String, String)>,
}

impl SourceRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// HTTP response to a source request
#[derive(Debug)]
pub struct SourceResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl SourceResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A backend that can look up a search term.
///
/// Implementations build one GET request and parse its response; the
/// provided [`SourceAdapter::find`] performs the round trip and folds every
/// error into [`SourceOutcome::Failure`]. Adapters hold no mutable state and
/// are shared between concurrent lookups.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Human-readable name for listings
    fn readable_name(&self) -> &str;

    /// One-line description for listings
    fn description(&self) -> &str;

    /// Bound on the round trip
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    /// Build the HTTP request for a search term
    fn request(&self, term: &str) -> anyhow::Result<SourceRequest>;

    /// Parse the HTTP response into candidates
    fn response(&self, response: SourceResponse) -> anyhow::Result<Vec<SearchResult>>;

    /// Look up `term`, never returning an error to the caller
    async fn find(&self, client: &HttpClient, term: &str) -> SourceOutcome {
        let request = match self.request(term) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to build request for {}: {}", self.readable_name(), e);
                return SourceOutcome::Failure(SourceError::Parse(e.to_string()));
            }
        };

        let limit = self.timeout();
        let response = match timeout(limit, client.execute_with_timeout(request, limit)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("Request failed for {}: {}", self.readable_name(), e);
                return SourceOutcome::Failure(classify_transport_error(&e, limit));
            }
            Err(_) => {
                warn!("Timeout for source {}", self.readable_name());
                return SourceOutcome::Failure(SourceError::Timeout(limit));
            }
        };

        if !response.is_success() {
            warn!(
                "Source {} answered with HTTP {}",
                self.readable_name(),
                response.status
            );
            return SourceOutcome::Failure(SourceError::Status(response.status));
        }

        match self.response(response) {
            Ok(results) => {
                let total = results.len();
                let results: Vec<SearchResult> =
                    results.into_iter().filter(SearchResult::is_valid).collect();
                if results.len() < total {
                    debug!(
                        "Source {} dropped {} results without a title or absolute URL",
                        self.readable_name(),
                        total - results.len()
                    );
                }
                debug!(
                    "Source {} returned {} results",
                    self.readable_name(),
                    results.len()
                );
                SourceOutcome::from_results(results)
            }
            Err(e) => {
                warn!("Failed to parse response from {}: {}", self.readable_name(), e);
                SourceOutcome::Failure(SourceError::Parse(e.to_string()))
            }
        }
    }
}

fn classify_transport_error(error: &anyhow::Error, limit: Duration) -> SourceError {
    match error.downcast_ref::<reqwest::Error>() {
        Some(e) if e.is_timeout() => SourceError::Timeout(limit),
        _ => SourceError::Transport(error.to_string()),
    }
}

/// Listing entry for a registered source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceListing {
    /// Registry key
    pub key: String,
    /// Human-readable name
    pub readable_name: String,
    /// One-line description
    pub description: String,
}
