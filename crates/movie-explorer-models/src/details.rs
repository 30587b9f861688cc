use serde::{Deserialize, Serialize};

use crate::movie::{MediaKind, MovieSummary};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecondaryRating {
    pub source: String,
    pub value: String,
}

/// Full record for a single title. The provider guarantees none of these
/// fields beyond the id; absence is not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: Option<String>,
    pub year: Option<String>,
    pub kind: Option<MediaKind>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    #[serde(default)]
    pub ratings: Vec<SecondaryRating>,
}

impl MovieDetails {
    /// The summary form used by the watchlist. `None` when the record is
    /// missing the fields every matched lookup normally carries.
    pub fn to_summary(&self) -> Option<MovieSummary> {
        Some(MovieSummary {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone()?,
            year: self.year.clone()?,
            kind: self.kind.unwrap_or(MediaKind::Movie),
            poster_url: self.poster_url.clone(),
        })
    }
}
