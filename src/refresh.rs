use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::provider::{CatalogProvider, FetchError};
use crate::store::CatalogStore;

/// Periodically fetches the catalog and swaps it into the store.
pub struct Refresher<P: CatalogProvider> {
    store: Arc<CatalogStore>,
    provider: Arc<P>,
    interval: Duration,
}

impl<P: CatalogProvider> Refresher<P> {
    pub fn new(store: Arc<CatalogStore>, provider: Arc<P>, interval: Duration) -> Self {
        Self {
            store,
            provider,
            interval,
        }
    }

    /// Fetch once and install the result, even if it is empty.
    /// On error the store is left untouched.
    pub async fn refresh_once(&self) -> Result<usize, FetchError> {
        let games = self.provider.fetch_games().await?;
        let count = games.len();
        self.store.replace(games);
        Ok(count)
    }

    /// Fetch once, logging the outcome instead of returning it.
    pub async fn refresh_logged(&self) {
        match self.refresh_once().await {
            Ok(0) => tracing::warn!("Upstream returned an empty catalog"),
            Ok(count) => tracing::info!(count, "Loaded games into catalog"),
            Err(e) => tracing::warn!(
                kept = self.store.count(),
                "Catalog refresh failed, keeping current catalog: {}",
                e
            ),
        }
    }

    /// Run the refresh loop forever. The first refresh happens one interval
    /// from now; call `refresh_logged` beforehand for the startup load.
    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.refresh_logged().await;
        }
    }
}
