use std::sync::Arc;
use std::time::Duration;

use crate::store::CatalogStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub stream_tick: Duration,
}

impl AppState {
    pub fn new(store: Arc<CatalogStore>, stream_tick: Duration) -> Self {
        Self { store, stream_tick }
    }
}
