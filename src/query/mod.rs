//! Query parsing module
//!
//! Handles the argument grammar of the lookup commands:
//! - Plain search terms: `vim`
//! - An addressee for the reply: `vim @ alice`
//! - The explicit source form: `find wiki vim @ alice`

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `<term> @ <addressee>`, split at the last ` @ ` before a single token
static ADDRESSEE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(.+) @ (\S+)$").expect("addressee pattern is valid"));

/// Errors produced while parsing command arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The arguments contain no search term
    #[error("invalid parameters")]
    InvalidParams,
}

/// Search term plus the optional user the reply is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// The search term sent to the source
    pub term: String,
    /// User to prefix the reply with
    pub addressee: Option<String>,
}

impl ParsedQuery {
    /// Parse the free-text arguments of a lookup command
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let raw = raw.trim();

        let (term, addressee) = match ADDRESSEE_RE.captures(raw) {
            Some(cap) => (
                cap.get(1).map_or("", |m| m.as_str()).trim(),
                Some(cap[2].to_string()),
            ),
            None => (raw, None),
        };

        if term.is_empty() {
            return Err(QueryError::InvalidParams);
        }

        Ok(Self {
            term: term.to_string(),
            addressee,
        })
    }

    /// Prefix `text` with the addressee, if any
    pub fn address(&self, text: &str) -> String {
        match &self.addressee {
            Some(user) => format!("{}: {}", user, text),
            None => text.to_string(),
        }
    }
}

/// Arguments of the explicit `find <source> <terms>` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    /// Key of the source to query
    pub source: String,
    /// Remaining arguments
    pub query: ParsedQuery,
}

impl FindCommand {
    /// Split off the source key and parse the rest
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let raw = raw.trim();
        let (source, rest) = raw
            .split_once(char::is_whitespace)
            .ok_or(QueryError::InvalidParams)?;

        Ok(Self {
            source: source.to_string(),
            query: ParsedQuery::parse(rest)?,
        })
    }
}
