use anyhow::Result;
use movie_explorer_models::MovieSummary;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable storage for the watchlist. One JSON file holds the full ordered
/// list; nothing else in the system touches the storage medium directly.
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored list. A missing file or unreadable content yields an
    /// empty list, never an error.
    pub fn load(&self) -> Vec<MovieSummary> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "watchlist file does not exist, starting empty");
            return Vec::new();
        }
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read watchlist file, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<MovieSummary>>(&content) {
            Ok(entries) => {
                debug!(count = entries.len(), "loaded watchlist");
                entries
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "watchlist file is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Save the full list. Atomic write: temp file, then rename.
    pub fn save(&self, entries: &[MovieSummary]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string(entries)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, serialized)?;
        std::fs::rename(&temp_path, &self.path)?;
        debug!(count = entries.len(), "saved watchlist");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_explorer_models::MediaKind;

    fn summary(imdb_id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: "1994".to_string(),
            kind: MediaKind::Movie,
            poster_url: Some("https://img.example/poster.jpg".to_string()),
        }
    }

    #[test]
    fn round_trips_a_saved_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("watchlist.json"));

        let entries = vec![
            summary("tt0111161", "The Shawshank Redemption"),
            MovieSummary {
                poster_url: None,
                ..summary("tt0068646", "The Godfather")
            },
        ];
        store.save(&entries).unwrap();

        assert_eq!(store.load(), entries);
    }

    #[test]
    fn round_trips_the_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("watchlist.json"));

        store.save(&[]).unwrap();

        assert_eq!(store.load(), Vec::<MovieSummary>::new());
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("watchlist.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.json");
        std::fs::write(&path, "not json {{{").unwrap();
        let store = WatchlistStore::new(path);

        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("data").join("watchlist.json"));

        store.save(&[summary("tt0111161", "The Shawshank Redemption")]).unwrap();

        assert_eq!(store.load().len(), 1);
    }
}
