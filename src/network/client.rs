//! HTTP client for making requests to sources

use crate::config::OutgoingSettings;
use crate::sources::{SourceRequest, SourceResponse};
use anyhow::Result;
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper shared by every source
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let default_timeout = Duration::try_from_secs_f64(settings.request_timeout)
            .ok()
            .filter(|t| !t.is_zero())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "outgoing.request_timeout must be a positive number of seconds, got {}",
                    settings.request_timeout
                )
            })?;

        let mut builder = Client::builder()
            .timeout(default_timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout,
            user_agent: settings
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
        })
    }

    /// Execute a source request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: SourceRequest,
        timeout: Duration,
    ) -> Result<SourceResponse> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> Result<SourceResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(SourceResponse { status, text, url })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Default per-request timeout
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

/// Identifying User-Agent sent when none is configured
pub fn default_user_agent() -> String {
    format!("aggregator-rs/{}", crate::VERSION)
}
