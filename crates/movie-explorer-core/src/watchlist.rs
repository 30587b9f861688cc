use movie_explorer_models::MovieSummary;
use tracing::{info, warn};

use crate::store::WatchlistStore;

/// Owns the in-memory ordered watchlist and keeps the store in sync after
/// every mutation. Invariant: no two entries share an `imdb_id`.
pub struct WatchlistManager {
    entries: Vec<MovieSummary>,
    store: WatchlistStore,
}

impl WatchlistManager {
    /// Initialize from whatever the store currently holds.
    pub fn new(store: WatchlistStore) -> Self {
        let entries = store.load();
        info!(count = entries.len(), "watchlist initialized");
        Self { entries, store }
    }

    pub fn entries(&self) -> &[MovieSummary] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|m| m.imdb_id == imdb_id)
    }

    /// Append a movie unless it is already present.
    pub fn add(&mut self, movie: MovieSummary) {
        if self.contains(&movie.imdb_id) {
            warn!(imdb_id = %movie.imdb_id, title = %movie.title, "movie already in watchlist");
        } else {
            info!(imdb_id = %movie.imdb_id, title = %movie.title, "added movie to watchlist");
            self.entries.push(movie);
        }
        self.persist();
    }

    /// Drop the entry with this id, if present.
    pub fn remove(&mut self, imdb_id: &str) {
        let before = self.entries.len();
        self.entries.retain(|m| m.imdb_id != imdb_id);
        if self.entries.len() < before {
            info!(imdb_id, "removed movie from watchlist");
        } else {
            warn!(imdb_id, "movie not in watchlist, nothing removed");
        }
        self.persist();
    }

    /// Replace the whole order. The caller supplies a permutation of the
    /// current members; membership is not re-validated here.
    pub fn reorder(&mut self, new_order: Vec<MovieSummary>) {
        info!(count = new_order.len(), "reordered watchlist");
        self.entries = new_order;
        self.persist();
    }

    pub fn clear(&mut self) {
        info!("clearing watchlist");
        self.entries.clear();
        self.persist();
    }

    /// Final save for shutdown hooks. Mutations already write through, so
    /// this only matters when an earlier save failed.
    pub fn flush(&self) {
        self.persist();
    }

    // Write-through after a mutation. A failed save leaves the in-memory
    // state authoritative for the rest of the session.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.entries) {
            warn!(error = %e, "failed to save watchlist, continuing in memory only");
        }
    }
}
