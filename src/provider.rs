use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

use crate::models::Game;

/// Error type for catalog fetches.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {0}")]
    Status(StatusCode),

    #[error("Malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the full game catalog.
pub trait CatalogProvider: Send + Sync {
    fn fetch_games(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Game>, FetchError>> + Send;
}

/// Catalog provider backed by an HTTP endpoint returning a JSON array of games.
pub struct HttpCatalogProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogProvider for HttpCatalogProvider {
    async fn fetch_games(&self) -> Result<Vec<Game>, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        decode_catalog(&body)
    }
}

/// Decode an upstream catalog body. An empty array is a valid, empty catalog.
pub fn decode_catalog(body: &[u8]) -> Result<Vec<Game>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}
