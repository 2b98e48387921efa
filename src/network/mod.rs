//! HTTP networking module
//!
//! Provides the HTTP client sources use for their single round trip.

mod client;

pub use client::{default_user_agent, HttpClient};
