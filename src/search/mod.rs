//! Lookup orchestration module
//!
//! Ties the registry, query parsing, ranking and formatting together for a
//! single command.

mod dispatcher;

pub use dispatcher::{DispatchOutcome, Dispatcher, FIND_COMMAND, LIST_COMMAND};
