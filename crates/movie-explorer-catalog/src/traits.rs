use async_trait::async_trait;
use movie_explorer_models::{MovieDetails, MovieSummary};

use crate::error::CatalogError;

/// Outcome of a title search. The provider signals "no results" as a
/// normal response, not a transport error, so it gets its own arm here.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Matched {
        /// Up to one provider page of matches, in provider order.
        results: Vec<MovieSummary>,
        /// The provider's reported total across all pages.
        total_count: u64,
    },
    NoMatch {
        message: Option<String>,
    },
}

/// One-shot request mapper over an external movie catalog. No retry, no
/// caching, no rate limiting; higher layers decide retry policy.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn search_by_title(&self, query: &str) -> Result<SearchOutcome, CatalogError>;

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError>;
}
