//! Lookup orchestration: resolve, parse, invoke, rank, format

use crate::delivery::DeliverySink;
use crate::network::HttpClient;
use crate::query::{FindCommand, ParsedQuery};
use crate::results::{format_result, select_best};
use crate::sources::{SourceAdapter, SourceOutcome, SourceRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Command word of the explicit lookup form
pub const FIND_COMMAND: &str = "find";

/// Command word listing the registered sources
pub const LIST_COMMAND: &str = "lssources";

/// Terminal state of a single lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A reply line was produced
    Delivered(String),
    /// No source is registered under the key
    SourceNotFound,
    /// The arguments held no search term
    InvalidParams { command: String },
    /// The source could not be reached or answered garbage
    AdapterFailure,
    /// The source answered without matches
    NoResults,
}

impl DispatchOutcome {
    /// The line shown to the user for this outcome
    pub fn message(&self) -> String {
        match self {
            Self::Delivered(text) => text.clone(),
            Self::SourceNotFound => "The specified source was not found.".to_string(),
            Self::InvalidParams { command } if command == FIND_COMMAND => {
                "Invalid parameters. Usage: find [source] [search terms] (@ [user])".to_string()
            }
            Self::InvalidParams { command } => format!(
                "You need to specify a search term. Usage: {} [search term] (@ [user])",
                command
            ),
            Self::AdapterFailure => {
                "The source could not be reached. Please try again later.".to_string()
            }
            Self::NoResults => "I had no search results for that query.".to_string(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

/// Routes lookup commands to sources and renders the best match.
///
/// Holds no per-request state; clones share the registry and client.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<SourceRegistry>,
    client: HttpClient,
}

impl Dispatcher {
    pub fn new(registry: Arc<SourceRegistry>, client: HttpClient) -> Self {
        Self { registry, client }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Look up `raw_args` in the source registered as `source_key`
    pub async fn dispatch(&self, source_key: &str, raw_args: &str) -> DispatchOutcome {
        let Some(source) = self.registry.resolve(source_key) else {
            debug!("Unknown source: {}", source_key);
            return DispatchOutcome::SourceNotFound;
        };

        let query = match ParsedQuery::parse(raw_args) {
            Ok(query) => query,
            Err(_) => {
                return DispatchOutcome::InvalidParams {
                    command: source_key.to_string(),
                }
            }
        };

        self.lookup(source_key, source.as_ref(), &query).await
    }

    /// `find <source> <terms> (@ <user>)`
    pub async fn find(&self, raw_args: &str) -> DispatchOutcome {
        let command = match FindCommand::parse(raw_args) {
            Ok(command) => command,
            Err(_) => {
                return DispatchOutcome::InvalidParams {
                    command: FIND_COMMAND.to_string(),
                }
            }
        };

        let Some(source) = self.registry.resolve(&command.source) else {
            debug!("Unknown source: {}", command.source);
            return DispatchOutcome::SourceNotFound;
        };

        self.lookup(&command.source, source.as_ref(), &command.query)
            .await
    }

    async fn lookup(
        &self,
        source_key: &str,
        source: &dyn SourceAdapter,
        query: &ParsedQuery,
    ) -> DispatchOutcome {
        info!("Looking up '{}' in {}", query.term, source_key);

        let results = match source.find(&self.client, &query.term).await {
            SourceOutcome::Results(results) => results,
            SourceOutcome::Empty => return DispatchOutcome::NoResults,
            SourceOutcome::Failure(e) => {
                warn!("Source {} failed: {}", source_key, e);
                return DispatchOutcome::AdapterFailure;
            }
        };

        match select_best(&query.term, &results) {
            Some(best) => {
                debug!("Best match for '{}': {}", query.term, best.title);
                DispatchOutcome::Delivered(query.address(&format_result(best)))
            }
            None => DispatchOutcome::NoResults,
        }
    }

    /// `"<key> (<readable name>)"` for every source, in registration order
    pub fn list_sources(&self) -> Vec<String> {
        self.registry
            .list_all()
            .into_iter()
            .map(|s| format!("{} ({})", s.key, s.readable_name))
            .collect()
    }

    /// Reply line for the source listing command
    pub fn list_message(&self) -> String {
        format!("Available sources: {}", self.list_sources().join(", "))
    }

    /// Handle one routed command and deliver the reply.
    ///
    /// Returns `false` when the command is not one of ours.
    pub async fn handle(
        &self,
        sink: &dyn DeliverySink,
        destination: &str,
        command: &str,
        raw_args: &str,
    ) -> bool {
        let command = command.to_lowercase();

        if command == LIST_COMMAND {
            sink.deliver(destination, &self.list_message());
            return true;
        }

        let outcome = if command == FIND_COMMAND {
            self.find(raw_args).await
        } else if self.registry.contains(&command) {
            self.dispatch(&command, raw_args).await
        } else {
            return false;
        };

        sink.deliver(destination, &outcome.message());
        true
    }
}
