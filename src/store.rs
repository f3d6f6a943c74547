use std::sync::{Arc, PoisonError, RwLock};

use rand::seq::IndexedRandom;

use crate::models::Game;

/// In-memory catalog of games, swapped whole on every refresh.
///
/// The lock guards an `Arc` to an immutable snapshot. Writers hold the write
/// lock only for the pointer swap; readers clone the `Arc` under the read lock
/// and work on that snapshot after releasing it.
#[derive(Debug, Default)]
pub struct CatalogStore {
    games: RwLock<Arc<Vec<Game>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `games` as the current catalog, discarding the previous one.
    pub fn replace(&self, games: Vec<Game>) {
        let next = Arc::new(games);
        // A poisoned lock still holds a complete snapshot, so keep going.
        let mut current = self.games.write().unwrap_or_else(PoisonError::into_inner);
        *current = next;
    }

    /// Get the current catalog snapshot.
    pub fn snapshot(&self) -> Arc<Vec<Game>> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Pick one game uniformly at random, or `None` if the catalog is empty.
    pub fn sample_random(&self) -> Option<Game> {
        let snapshot = self.snapshot();
        snapshot.choose(&mut rand::rng()).cloned()
    }

    /// Number of games in the current catalog.
    pub fn count(&self) -> usize {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
