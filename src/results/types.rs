//! Result type definitions

use serde::{Deserialize, Serialize};
use url::Url;

/// A single candidate returned by a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result (never empty)
    pub title: String,
    /// Absolute URL of the result
    pub uri: String,
    /// Description snippet
    pub description: Option<String>,
}

impl SearchResult {
    /// Create a new result without a description
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
            description: None,
        }
    }

    /// Add a description to the result
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description, treating a missing one as empty
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Whether the result carries a title and an absolute URL
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && Url::parse(&self.uri).is_ok()
    }
}
