//! Lookup source module
//!
//! Defines the SourceAdapter trait and provides a registry for all sources.

mod loader;
mod registry;
mod traits;

// Source implementations
pub mod archpkg;
pub mod aur;
pub mod mediawiki;
pub mod urbandictionary;

pub use loader::{LoadError, LoadListener, SourceLoader};
pub use registry::{RegistryError, SourceRegistry};
pub use traits::*;
