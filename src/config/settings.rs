//! Settings structures for aggregator-rs configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, read from `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub outgoing: OutgoingSettings,
    pub aggregator: AggregatorSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (AGGREGATOR_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("AGGREGATOR_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("AGGREGATOR_LOG_LEVEL") {
            self.general.log_level = val;
        }
        if let Ok(val) = std::env::var("AGGREGATOR_REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
    }

    /// Get all enabled sources, in configuration order
    pub fn enabled_sources(&self) -> Vec<&SourceConfig> {
        self.aggregator.sources.iter().filter(|s| !s.disabled).collect()
    }

    /// Filter directive for the log subscriber
    pub fn log_filter(&self) -> &str {
        if self.general.debug {
            "debug"
        } else {
            &self.general.log_level
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// User agent string (none = aggregator-rs/<version>)
    pub user_agent: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 2.0,
            user_agent: None,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Source list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorSettings {
    /// Sources in listing order
    pub sources: Vec<SourceConfig>,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            sources: default_sources(),
        }
    }
}

/// Individual source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Command word selecting this source
    pub key: String,
    /// Source factory to use (wikipedia, mediawiki, archwiki, archpkg, aur, urbandictionary)
    pub source: String,
    /// Whether source is disabled
    pub disabled: bool,
    /// Override the endpoint
    pub api_url: Option<String>,
    /// Wikipedia language code
    pub lang: Option<String>,
    /// Number of candidates requested (MediaWiki only)
    pub limit: Option<u32>,
    /// Custom timeout for this source, in seconds
    pub timeout: Option<f64>,
    /// Display name (required for mediawiki)
    pub display_name: Option<String>,
    /// Listing description (mediawiki only)
    pub description: Option<String>,
}

impl SourceConfig {
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            ..Default::default()
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            source: String::new(),
            disabled: false,
            api_url: None,
            lang: None,
            limit: None,
            timeout: None,
            display_name: None,
            description: None,
        }
    }
}

/// Default source configurations
fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            lang: Some("en".to_string()),
            ..SourceConfig::new("wiki", "wikipedia")
        },
        SourceConfig {
            lang: Some("nl".to_string()),
            ..SourceConfig::new("wikinl", "wikipedia")
        },
        SourceConfig::new("archwiki", "archwiki"),
        SourceConfig::new("pkg", "archpkg"),
        SourceConfig::new("aur", "aur"),
        SourceConfig::new("ud", "urbandictionary"),
    ]
}
