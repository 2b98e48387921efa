//! Source registry keyed by command word

use super::traits::{SourceAdapter, SourceListing};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Another source already uses this key
    #[error("source key already registered: {0}")]
    DuplicateKey(String),
}

/// Registry of all configured sources, in registration order
pub struct SourceRegistry {
    /// Sources in registration order
    sources: Vec<(String, Arc<dyn SourceAdapter>)>,
    /// Key -> index into `sources`
    index: HashMap<String, usize>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a source under `key` (stored lowercase).
    ///
    /// Registering the same instance twice under one key is a no-op.
    pub fn register(
        &mut self,
        key: &str,
        source: Arc<dyn SourceAdapter>,
    ) -> Result<(), RegistryError> {
        let key = key.trim().to_lowercase();

        if let Some(&i) = self.index.get(&key) {
            if Arc::ptr_eq(&self.sources[i].1, &source) {
                return Ok(());
            }
            return Err(RegistryError::DuplicateKey(key));
        }

        self.index.insert(key.clone(), self.sources.len());
        self.sources.push((key, source));
        Ok(())
    }

    /// Get a source by key
    pub fn resolve(&self, key: &str) -> Option<&Arc<dyn SourceAdapter>> {
        self.index
            .get(&key.to_lowercase())
            .map(|&i| &self.sources[i].1)
    }

    /// Check if a source exists
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_lowercase())
    }

    /// All sources with their names, in registration order
    pub fn list_all(&self) -> Vec<SourceListing> {
        self.sources
            .iter()
            .map(|(key, source)| SourceListing {
                key: key.clone(),
                readable_name: source.readable_name().to_string(),
                description: source.description().to_string(),
            })
            .collect()
    }

    /// All keys, in registration order
    pub fn keys(&self) -> Vec<&str> {
        self.sources.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// Get number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
