//! Aggregator-RS: best-match lookups for chat bots
//!
//! A command such as `wiki rust @ alice` is sent to one configured source
//! (Wikipedia, the Arch Linux package index, the AUR, Urban Dictionary, ...),
//! the candidate closest to the query is picked by edit distance and a single
//! reply line is handed to the delivery sink.

pub mod config;
pub mod delivery;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod sources;

pub use config::Settings;
pub use query::ParsedQuery;
pub use results::SearchResult;
pub use search::{DispatchOutcome, Dispatcher};
pub use sources::{SourceAdapter, SourceOutcome, SourceRegistry};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
