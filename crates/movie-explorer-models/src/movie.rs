use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
}

/// One catalog match as returned from a title search. Immutable once
/// returned; identity is `imdb_id`. This is also the record the watchlist
/// persists, so its serialized form must stay a pure inverse of itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}
