//! Shared application context.
//!
//! [`AppContext`] is handed to every route handler via Axum state. It is
//! immutable after startup; each request fetches its own scene snapshot.

use std::sync::Arc;

use sv_core::config::Config;
use sv_stash::SceneCatalog;

/// Central application state, cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn SceneCatalog>,
}

impl AppContext {
    pub fn new(config: Config, catalog: Arc<dyn SceneCatalog>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}
