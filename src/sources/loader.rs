//! Source loader for initializing sources from configuration

use super::registry::{RegistryError, SourceRegistry};
use super::traits::{SourceAdapter, SourceListing, SourceRequest, SourceResponse};
use super::{archpkg, aur, mediawiki, urbandictionary};
use crate::config::{Settings, SourceConfig};
use crate::results::SearchResult;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while turning configuration into sources
#[derive(Debug, Error)]
pub enum LoadError {
    /// No factory is registered under this name
    #[error("unknown source type '{source_type}' for key '{key}'")]
    UnknownSource { key: String, source_type: String },
    /// The entry is missing a required field or has a bad value
    #[error("invalid configuration for source '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Called once with the final source list after loading
pub type LoadListener = Box<dyn Fn(&[SourceListing]) + Send + Sync>;

type Factory = fn(&SourceConfig) -> Result<Box<dyn SourceAdapter>, LoadError>;

/// Named source factories, in the order they are documented
const FACTORIES: &[(&str, Factory)] = &[
    ("wikipedia", new_wikipedia),
    ("archwiki", new_archwiki),
    ("mediawiki", new_mediawiki),
    ("archpkg", new_archpkg),
    ("aur", new_aur),
    ("urbandictionary", new_urbandictionary),
];

/// Loader for initializing sources from configuration
pub struct SourceLoader<'a> {
    settings: &'a Settings,
    listeners: Vec<LoadListener>,
}

impl<'a> SourceLoader<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            listeners: Vec::new(),
        }
    }

    /// Register a callback that receives the finished source list
    pub fn on_loaded<F>(mut self, listener: F) -> Self
    where
        F: Fn(&[SourceListing]) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Load all enabled sources from settings.
    ///
    /// Disabled entries are ignored. Entries naming an unknown or
    /// misconfigured source are logged and skipped; a duplicate key aborts
    /// loading.
    pub fn load(self) -> Result<SourceRegistry, LoadError> {
        let mut registry = SourceRegistry::new();
        let default_timeout = self.settings.outgoing.request_timeout;

        for config in self.settings.enabled_sources() {
            match Self::create_source(config, default_timeout) {
                Ok(source) => {
                    registry.register(&config.key, source.clone())?;
                    debug!(
                        key = %config.key,
                        source = %config.source,
                        name = source.readable_name(),
                        description = source.description(),
                        "Added source"
                    );
                }
                Err(e) => {
                    warn!("Failed to load source {}: {}", config.key, e);
                }
            }
        }

        info!("Loaded {} sources", registry.len());

        let listing = registry.list_all();
        for listener in &self.listeners {
            listener(&listing);
        }

        Ok(registry)
    }

    /// Create a source instance from its configuration entry
    pub fn create_source(
        config: &SourceConfig,
        default_timeout: f64,
    ) -> Result<Arc<dyn SourceAdapter>, LoadError> {
        if config.key.trim().is_empty() {
            return Err(invalid(config, "key must not be empty"));
        }
        if config.key.chars().any(char::is_whitespace) {
            return Err(invalid(config, "key must be a single word"));
        }

        let factory = FACTORIES
            .iter()
            .find(|(name, _)| *name == config.source)
            .map(|(_, factory)| *factory)
            .ok_or_else(|| LoadError::UnknownSource {
                key: config.key.clone(),
                source_type: config.source.clone(),
            })?;

        let seconds = config.timeout.unwrap_or(default_timeout);
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(invalid(config, "timeout must be a positive number of seconds"));
        }

        let inner = factory(config)?;
        Ok(Arc::new(Configured {
            inner,
            timeout: Duration::from_secs_f64(seconds),
        }))
    }

    /// Get list of available source types
    pub fn available_sources() -> Vec<&'static str> {
        FACTORIES.iter().map(|(name, _)| *name).collect()
    }
}

fn invalid(config: &SourceConfig, reason: &str) -> LoadError {
    LoadError::InvalidConfig {
        key: config.key.clone(),
        reason: reason.to_string(),
    }
}

fn new_wikipedia(config: &SourceConfig) -> Result<Box<dyn SourceAdapter>, LoadError> {
    let mut wiki = mediawiki::MediaWiki::wikipedia(config.lang.as_deref().unwrap_or("en"));
    if let Some(ref url) = config.api_url {
        wiki = wiki.with_api_url(url);
    }
    if let Some(limit) = config.limit {
        wiki = wiki.with_limit(limit);
    }
    Ok(Box::new(wiki))
}

fn new_archwiki(config: &SourceConfig) -> Result<Box<dyn SourceAdapter>, LoadError> {
    let mut wiki = mediawiki::MediaWiki::arch_wiki();
    if let Some(ref url) = config.api_url {
        wiki = wiki.with_api_url(url);
    }
    if let Some(limit) = config.limit {
        wiki = wiki.with_limit(limit);
    }
    Ok(Box::new(wiki))
}

fn new_mediawiki(config: &SourceConfig) -> Result<Box<dyn SourceAdapter>, LoadError> {
    let api_url = config
        .api_url
        .as_ref()
        .ok_or_else(|| invalid(config, "mediawiki sources need an api_url"))?;
    url::Url::parse(api_url).map_err(|e| invalid(config, &format!("bad api_url: {}", e)))?;

    let name = config
        .display_name
        .clone()
        .unwrap_or_else(|| config.key.clone());
    let description = config
        .description
        .clone()
        .unwrap_or_else(|| format!("Search {} for a given string.", name));

    let mut wiki = mediawiki::MediaWiki::new(api_url, name, description);
    if let Some(limit) = config.limit {
        wiki = wiki.with_limit(limit);
    }
    Ok(Box::new(wiki))
}

fn new_archpkg(config: &SourceConfig) -> Result<Box<dyn SourceAdapter>, LoadError> {
    let mut pkg = archpkg::ArchPkg::new();
    if let Some(ref url) = config.api_url {
        pkg = pkg.with_api_url(url);
    }
    Ok(Box::new(pkg))
}

fn new_aur(config: &SourceConfig) -> Result<Box<dyn SourceAdapter>, LoadError> {
    let mut source = aur::Aur::new();
    if let Some(ref url) = config.api_url {
        source = source.with_api_url(url);
    }
    Ok(Box::new(source))
}

fn new_urbandictionary(config: &SourceConfig) -> Result<Box<dyn SourceAdapter>, LoadError> {
    let mut ud = urbandictionary::UrbanDictionary::new();
    if let Some(ref url) = config.api_url {
        ud = ud.with_api_url(url);
    }
    Ok(Box::new(ud))
}

/// A factory-built source with its configured timeout
struct Configured {
    inner: Box<dyn SourceAdapter>,
    timeout: Duration,
}

impl SourceAdapter for Configured {
    fn readable_name(&self) -> &str {
        self.inner.readable_name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request(&self, term: &str) -> anyhow::Result<SourceRequest> {
        self.inner.request(term)
    }

    fn response(&self, response: SourceResponse) -> anyhow::Result<Vec<SearchResult>> {
        self.inner.response(response)
    }
}
