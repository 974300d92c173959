//! sv-stash: catalog access for stash-vr.
//!
//! The server only depends on the [`SceneCatalog`] trait; [`StashClient`]
//! implements it against a Stash GraphQL endpoint.

pub mod client;
mod query;

use async_trait::async_trait;
use sv_core::{Result, Scene};

pub use client::StashClient;

/// Read access to catalog scenes.
#[async_trait]
pub trait SceneCatalog: Send + Sync {
    /// Fetch one scene by id.
    ///
    /// Returns [`Error::NotFound`](sv_core::Error::NotFound) when the
    /// catalog has no such scene and
    /// [`Error::Catalog`](sv_core::Error::Catalog) on transport or query
    /// failures.
    async fn find_scene(&self, id: &str) -> Result<Scene>;
}
