use async_trait::async_trait;
use movie_explorer_models::MovieDetails;
use reqwest::Client;

use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::{CatalogProvider, SearchOutcome};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Typed client for the OMDb HTTP API.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl CatalogProvider for OmdbClient {
    async fn search_by_title(&self, query: &str) -> Result<SearchOutcome, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return Err(CatalogError::EmptyId);
        }
        api::details(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Blank inputs must be rejected before any request goes out, so a base
    // url that resolves nowhere proves no call was attempted.
    #[tokio::test]
    async fn blank_query_fails_fast_without_io() {
        let client = OmdbClient::with_base_url(
            "http://127.0.0.1:1/".to_string(),
            "test-key".to_string(),
        );
        let result = client.search_by_title("   ").await;
        assert!(matches!(result, Err(CatalogError::EmptyQuery)));
    }

    #[tokio::test]
    async fn blank_id_fails_fast_without_io() {
        let client = OmdbClient::with_base_url(
            "http://127.0.0.1:1/".to_string(),
            "test-key".to_string(),
        );
        let result = client.fetch_details("").await;
        assert!(matches!(result, Err(CatalogError::EmptyId)));
    }
}
