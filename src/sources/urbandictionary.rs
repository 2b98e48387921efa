//! Urban Dictionary definitions

use super::traits::*;
use crate::results::SearchResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;

/// Dictionary lookup returning the best-voted definition only
pub struct UrbanDictionary {
    api_url: String,
}

impl UrbanDictionary {
    pub fn new() -> Self {
        Self {
            api_url: "https://api.urbandictionary.com/v0/define".to_string(),
        }
    }

    /// Point the source at another `define` endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl Default for UrbanDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct DefineReply {
    list: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    word: String,
    definition: String,
    permalink: String,
    #[serde(default)]
    thumbs_up: i64,
    #[serde(default)]
    thumbs_down: i64,
}

impl Definition {
    fn net_score(&self) -> i64 {
        self.thumbs_up.saturating_sub(self.thumbs_down)
    }
}

/// First definition with the highest net score; later ties do not replace it
fn top_definition(definitions: Vec<Definition>) -> Option<Definition> {
    let mut top: Option<Definition> = None;

    for definition in definitions {
        let better = top
            .as_ref()
            .map_or(true, |best| definition.net_score() > best.net_score());
        if better {
            top = Some(definition);
        }
    }

    top
}

impl SourceAdapter for UrbanDictionary {
    fn readable_name(&self) -> &str {
        "Urban Dictionary"
    }

    fn description(&self) -> &str {
        "Define a word using Urban Dictionary."
    }

    fn request(&self, term: &str) -> AnyhowResult<SourceRequest> {
        Ok(SourceRequest::get(&self.api_url).param("term", term))
    }

    fn response(&self, response: SourceResponse) -> AnyhowResult<Vec<SearchResult>> {
        let reply: DefineReply = response.json()?;

        Ok(top_definition(reply.list)
            .map(|d| SearchResult::new(d.word, d.permalink).with_description(d.definition))
            .into_iter()
            .collect())
    }
}
