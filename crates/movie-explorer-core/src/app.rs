use movie_explorer_catalog::CatalogProvider;
use movie_explorer_models::MovieSummary;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::detail::{self, DetailHandle, DetailSession};
use crate::search::{self, SearchHandle, SearchSession};
use crate::store::WatchlistStore;
use crate::watchlist::WatchlistManager;

/// Application context: constructed once at startup, torn down with a
/// final save. Owns the watchlist and both session state machines;
/// presentation layers talk to this surface only.
pub struct ExplorerApp {
    watchlist: WatchlistManager,
    search: SearchHandle,
    search_state: watch::Receiver<SearchSession>,
    detail: DetailHandle,
    detail_state: watch::Receiver<DetailSession>,
}

impl ExplorerApp {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        store: WatchlistStore,
        debounce: Duration,
    ) -> Self {
        let watchlist = WatchlistManager::new(store);
        let (search, search_state) = search::spawn(Arc::clone(&provider), debounce);
        let (detail, detail_state) = detail::spawn(provider);
        Self {
            watchlist,
            search,
            search_state,
            detail,
            detail_state,
        }
    }

    pub fn submit_query(&self, text: impl Into<String>) {
        self.search.submit_query(text);
    }

    pub fn retry(&self) {
        self.search.retry();
    }

    pub fn open_detail(&self, imdb_id: impl Into<String>) {
        self.detail.open(imdb_id);
    }

    pub fn close_detail(&self) {
        self.detail.close();
    }

    pub fn add_to_watchlist(&mut self, movie: MovieSummary) {
        self.watchlist.add(movie);
    }

    pub fn remove_from_watchlist(&mut self, imdb_id: &str) {
        self.watchlist.remove(imdb_id);
    }

    pub fn reorder_watchlist(&mut self, new_order: Vec<MovieSummary>) {
        self.watchlist.reorder(new_order);
    }

    pub fn clear_watchlist(&mut self) {
        self.watchlist.clear();
    }

    pub fn watchlist(&self) -> &WatchlistManager {
        &self.watchlist
    }

    pub fn search_state(&self) -> watch::Receiver<SearchSession> {
        self.search_state.clone()
    }

    pub fn detail_state(&self) -> watch::Receiver<DetailSession> {
        self.detail_state.clone()
    }

    /// Final durable save. Mutations already write through, so this is
    /// only meaningful when an earlier save failed.
    pub fn shutdown(&self) {
        self.watchlist.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::DetailSession;
    use crate::search::SearchPhase;
    use movie_explorer_catalog::{CatalogError, SearchOutcome};
    use movie_explorer_models::{MediaKind, MovieDetails};

    struct SingleMovieCatalog;

    fn summary() -> MovieSummary {
        MovieSummary {
            imdb_id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: "1994".to_string(),
            kind: MediaKind::Movie,
            poster_url: None,
        }
    }

    #[async_trait::async_trait]
    impl movie_explorer_catalog::CatalogProvider for SingleMovieCatalog {
        async fn search_by_title(&self, _query: &str) -> Result<SearchOutcome, CatalogError> {
            Ok(SearchOutcome::Matched {
                results: vec![summary()],
                total_count: 1,
            })
        }

        async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError> {
            Ok(MovieDetails {
                imdb_id: imdb_id.to_string(),
                title: Some("The Shawshank Redemption".to_string()),
                year: Some("1994".to_string()),
                kind: Some(MediaKind::Movie),
                rated: None,
                released: None,
                runtime: None,
                genre: None,
                director: None,
                actors: None,
                plot: None,
                poster_url: None,
                imdb_rating: None,
                imdb_votes: None,
                ratings: Vec::new(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn the_callback_surface_drives_all_three_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("watchlist.json"));
        let mut app = ExplorerApp::new(
            Arc::new(SingleMovieCatalog),
            store,
            Duration::from_millis(500),
        );

        app.submit_query("shawshank");
        let mut search_state = app.search_state();
        loop {
            {
                let current = search_state.borrow_and_update();
                if matches!(current.phase, SearchPhase::Results(_)) {
                    break;
                }
            }
            search_state.changed().await.unwrap();
        }

        app.open_detail("tt0111161");
        let mut detail_state = app.detail_state();
        loop {
            {
                let current = detail_state.borrow_and_update();
                if matches!(&*current, DetailSession::Loaded { .. }) {
                    break;
                }
            }
            detail_state.changed().await.unwrap();
        }
        app.close_detail();

        app.add_to_watchlist(summary());
        app.add_to_watchlist(summary());
        assert_eq!(app.watchlist().len(), 1);

        app.remove_from_watchlist("tt0111161");
        assert!(app.watchlist().is_empty());

        app.shutdown();
        let reloaded = WatchlistManager::new(WatchlistStore::new(
            dir.path().join("watchlist.json"),
        ));
        assert!(reloaded.is_empty());
    }
}
