//! Per-client push loop for the live stream.
//!
//! A session sends one message as soon as it starts and then one per tick.
//! It owns its timer and stops as soon as the receiving side is dropped,
//! which is how a client disconnect reaches it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::models::{ErrorMessage, Game};
use crate::store::CatalogStore;

/// Messages buffered per session before the loop waits on the client.
const SESSION_BUFFER: usize = 4;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// One message pushed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    Game(Game),
    /// The catalog was empty at sampling time.
    NoGames(ErrorMessage),
}

impl SessionMessage {
    /// Sample the store for the next message.
    pub fn next(store: &CatalogStore) -> Self {
        match store.sample_random() {
            Some(game) => SessionMessage::Game(game),
            None => SessionMessage::NoGames(ErrorMessage::NO_GAMES),
        }
    }
}

/// A single client's stream.
pub struct StreamSession {
    id: u64,
    store: Arc<CatalogStore>,
    tick: Duration,
}

impl StreamSession {
    pub fn new(store: Arc<CatalogStore>, tick: Duration) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            store,
            tick,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Start the session on its own task.
    ///
    /// Dropping the returned receiver closes the session.
    pub fn spawn(self) -> (mpsc::Receiver<SessionMessage>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);
        let handle = tokio::spawn(self.run(tx));
        (rx, handle)
    }

    async fn run(self, tx: mpsc::Sender<SessionMessage>) {
        tracing::debug!(session = self.id, "Stream session opened");

        let mut sent: u64 = 0;
        if self.emit(&tx).await {
            sent += 1;

            let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    _ = ticker.tick() => {
                        if !self.emit(&tx).await {
                            break;
                        }
                        sent += 1;
                    }
                }
            }
        }

        tracing::debug!(session = self.id, sent, "Stream session closed");
    }

    /// Send one message. Returns false once the client is gone.
    async fn emit(&self, tx: &mpsc::Sender<SessionMessage>) -> bool {
        let message = SessionMessage::next(&self.store);
        tokio::select! {
            _ = tx.closed() => false,
            sent = tx.send(message) => sent.is_ok(),
        }
    }
}
