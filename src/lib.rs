pub mod config;
pub mod models;
pub mod provider;
pub mod refresh;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;

pub use config::Config;
pub use models::{ErrorMessage, Game, StatsResponse};
pub use provider::{CatalogProvider, FetchError, HttpCatalogProvider};
pub use refresh::Refresher;
pub use routes::create_router;
pub use session::{SessionMessage, StreamSession};
pub use state::AppState;
pub use store::CatalogStore;
