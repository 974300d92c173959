//! Unified error type for stash-vr.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for API handlers to derive an HTTP status code via [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in stash-vr.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found in the catalog.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "scene").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A scene exists but cannot be synthesized (e.g. it has no files).
    #[error("Malformed scene {id}: {reason}")]
    MalformedScene {
        /// The scene identifier.
        id: String,
        /// Human-readable description of what is missing.
        reason: String,
    },

    /// The upstream catalog could not be queried or returned an error.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Request or configuration data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::MalformedScene { .. } => 500,
            Error::Catalog(_) => 502,
            Error::Validation(_) => 400,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::MalformedScene`].
    pub fn malformed_scene(id: impl fmt::Display, reason: impl Into<String>) -> Self {
        Error::MalformedScene {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`Error::Catalog`].
    pub fn catalog(message: impl fmt::Display) -> Self {
        Error::Catalog(message.to_string())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
