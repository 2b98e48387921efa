//! MediaWiki OpenSearch source (Wikipedia, Arch Linux Wiki, ...)

use super::traits::*;
use crate::results::SearchResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;

/// Default number of titles requested from OpenSearch
pub const DEFAULT_LIMIT: u32 = 10;

/// Encyclopedia search against a MediaWiki `api.php` endpoint
pub struct MediaWiki {
    api_url: String,
    readable_name: String,
    description: String,
    limit: u32,
}

impl MediaWiki {
    pub fn new(
        api_url: impl Into<String>,
        readable_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            readable_name: readable_name.into(),
            description: description.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Wikipedia in the given language (e.g. "en", "nl", "de-AT")
    pub fn wikipedia(lang: &str) -> Self {
        let lang = lang
            .split('-')
            .next()
            .filter(|l| !l.is_empty())
            .unwrap_or("en")
            .to_lowercase();

        let (readable_name, description) = match lang.as_str() {
            "en" => (
                "Wikipedia".to_string(),
                "Search Wikipedia for a given string.".to_string(),
            ),
            "nl" => (
                "Wikipedia (Dutch variant)".to_string(),
                "Search the Dutch Wikipedia for a given string.".to_string(),
            ),
            other => (
                format!("Wikipedia ({})", other),
                format!("Search the {} Wikipedia for a given string.", other),
            ),
        };

        Self::new(
            format!("https://{}.wikipedia.org/w/api.php", lang),
            readable_name,
            description,
        )
    }

    /// The Arch Linux Wiki
    pub fn arch_wiki() -> Self {
        Self::new(
            "https://wiki.archlinux.org/api.php",
            "Arch Linux Wiki",
            "Search the Arch Linux Wiki for the given string.",
        )
    }

    /// Set the number of titles requested
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Point the source at another endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// OpenSearch reply: `[query, [titles], [descriptions], [uris]]`
#[derive(Debug, Deserialize)]
struct OpenSearchReply(String, Vec<String>, Vec<String>, Vec<String>);

impl SourceAdapter for MediaWiki {
    fn readable_name(&self) -> &str {
        &self.readable_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn request(&self, term: &str) -> AnyhowResult<SourceRequest> {
        Ok(SourceRequest::get(&self.api_url)
            .param("action", "opensearch")
            .param("namespace", "0")
            .param("limit", self.limit.to_string())
            .param("format", "json")
            .param("redirects", "resolve")
            .param("search", term))
    }

    fn response(&self, response: SourceResponse) -> AnyhowResult<Vec<SearchResult>> {
        let OpenSearchReply(_, titles, descriptions, uris) = response.json()?;

        if titles.len() != descriptions.len() || titles.len() != uris.len() {
            anyhow::bail!(
                "mismatched OpenSearch lists: {} titles, {} descriptions, {} uris",
                titles.len(),
                descriptions.len(),
                uris.len()
            );
        }

        let results = titles
            .into_iter()
            .zip(descriptions)
            .zip(uris)
            .map(|((title, description), uri)| {
                SearchResult::new(title, uri).with_description(description)
            })
            .collect();

        Ok(results)
    }
}
