//! sv-core: shared errors, configuration, and catalog types.
//!
//! This crate is the foundational dependency for all other sv-* crates,
//! providing the unified error type, the application configuration
//! (including the explicit [`config::SynthesisConfig`] handed to the
//! synthesis engine), and the read-only scene model fetched from the catalog.

pub mod config;
pub mod error;
pub mod scene;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use scene::*;
