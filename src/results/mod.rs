//! Result types, best-match ranking and formatting
//!
//! Sources hand back [`SearchResult`]s; [`select_best`] narrows them down to
//! one and [`format_result`] renders it as a single chat line.

pub mod format;
pub mod ranking;
mod types;

pub use format::format_result;
pub use ranking::{levenshtein, select_best, select_best_by};
pub use types::*;
