use std::sync::Arc;

use foundernest_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Document store (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Borrow the store as the `&dyn Store` the pipeline services take.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
