use movie_explorer_models::{MediaKind, MovieDetails, MovieSummary, SecondaryRating};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CatalogError, TransportError};
use crate::traits::SearchOutcome;

/// Poster value the provider uses when no artwork exists.
const NO_POSTER: &str = "N/A";

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Type")]
    item_type: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbDetailsResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Type")]
    item_type: Option<String>,
    #[serde(rename = "Rated")]
    rated: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Ratings")]
    ratings: Option<Vec<OmdbRating>>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn matched(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

fn media_kind(raw: Option<&str>) -> MediaKind {
    match raw {
        Some("series") => MediaKind::Series,
        Some("episode") => MediaKind::Episode,
        _ => MediaKind::Movie,
    }
}

/// Map the provider's "N/A" sentinel to a real absent value.
fn poster_url(raw: Option<String>) -> Option<String> {
    raw.filter(|p| !p.is_empty() && p != NO_POSTER)
}

impl OmdbSearchItem {
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            kind: media_kind(self.item_type.as_deref()),
            poster_url: poster_url(self.poster),
        }
    }
}

pub(crate) fn map_search_response(body: OmdbSearchResponse) -> SearchOutcome {
    if !matched(&body.response) {
        return SearchOutcome::NoMatch { message: body.error };
    }
    let results: Vec<MovieSummary> = body
        .search
        .unwrap_or_default()
        .into_iter()
        .map(OmdbSearchItem::into_summary)
        .collect();
    let total_count = body
        .total_results
        .as_deref()
        .and_then(|t| t.parse().ok())
        .unwrap_or(results.len() as u64);
    SearchOutcome::Matched {
        results,
        total_count,
    }
}

pub(crate) fn map_details_response(
    body: OmdbDetailsResponse,
    requested_id: &str,
) -> Result<MovieDetails, CatalogError> {
    if !matched(&body.response) {
        return Err(CatalogError::NotFound(
            body.error
                .unwrap_or_else(|| "Movie not found".to_string()),
        ));
    }
    Ok(MovieDetails {
        imdb_id: body.imdb_id.unwrap_or_else(|| requested_id.to_string()),
        title: body.title,
        year: body.year,
        kind: body.item_type.as_deref().map(|t| media_kind(Some(t))),
        rated: body.rated,
        released: body.released,
        runtime: body.runtime,
        genre: body.genre,
        director: body.director,
        actors: body.actors,
        plot: body.plot,
        poster_url: poster_url(body.poster),
        imdb_rating: body.imdb_rating,
        imdb_votes: body.imdb_votes,
        ratings: body
            .ratings
            .unwrap_or_default()
            .into_iter()
            .map(|r| SecondaryRating {
                source: r.source,
                value: r.value,
            })
            .collect(),
    })
}

/// Search the catalog by title.
pub(crate) async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<SearchOutcome, CatalogError> {
    let url = format!(
        "{}?apikey={}&s={}&type=movie",
        base_url,
        api_key,
        urlencoding::encode(query)
    );
    debug!(query, "issuing catalog search");
    let body: OmdbSearchResponse = get_json(client, &url).await?;
    Ok(map_search_response(body))
}

/// Fetch the full record for one title.
pub(crate) async fn details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetails, CatalogError> {
    let url = format!(
        "{}?apikey={}&i={}&plot=full",
        base_url,
        api_key,
        urlencoding::encode(imdb_id)
    );
    debug!(imdb_id, "issuing catalog details lookup");
    let body: OmdbDetailsResponse = get_json(client, &url).await?;
    map_details_response(body, imdb_id)
}

// The url carries the api key, so it must never reach a log line.
async fn get_json<T>(client: &Client, url: &str) -> Result<T, TransportError>
where
    T: for<'de> Deserialize<'de>,
{
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!(%status, "catalog returned non-success status");
        return Err(TransportError::Status { status });
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_matched_search_response() {
        let body: OmdbSearchResponse = serde_json::from_str(
            r#"{
                "Response": "True",
                "totalResults": "312",
                "Search": [
                    {"imdbID": "tt0372784", "Title": "Batman Begins", "Year": "2005", "Type": "movie", "Poster": "https://img.example/bb.jpg"},
                    {"imdbID": "tt0096895", "Title": "Batman", "Year": "1989", "Type": "movie", "Poster": "N/A"}
                ]
            }"#,
        )
        .unwrap();

        match map_search_response(body) {
            SearchOutcome::Matched {
                results,
                total_count,
            } => {
                assert_eq!(total_count, 312);
                assert_eq!(results.len(), 2);
                assert_eq!(results[0].imdb_id, "tt0372784");
                assert_eq!(results[0].kind, MediaKind::Movie);
                assert_eq!(
                    results[0].poster_url.as_deref(),
                    Some("https://img.example/bb.jpg")
                );
                assert_eq!(results[1].poster_url, None);
            }
            other => panic!("expected Matched, got {:?}", other),
        }
    }

    #[test]
    fn maps_no_match_response_with_message() {
        let body: OmdbSearchResponse = serde_json::from_str(
            r#"{"Response": "False", "Error": "Movie not found!"}"#,
        )
        .unwrap();

        match map_search_response(body) {
            SearchOutcome::NoMatch { message } => {
                assert_eq!(message.as_deref(), Some("Movie not found!"));
            }
            other => panic!("expected NoMatch, got {:?}", other),
        }
    }

    #[test]
    fn matched_response_without_search_field_maps_to_zero_results() {
        let body: OmdbSearchResponse =
            serde_json::from_str(r#"{"Response": "True", "totalResults": "0"}"#).unwrap();

        match map_search_response(body) {
            SearchOutcome::Matched {
                results,
                total_count,
            } => {
                assert!(results.is_empty());
                assert_eq!(total_count, 0);
            }
            other => panic!("expected Matched, got {:?}", other),
        }
    }

    #[test]
    fn maps_full_details_response() {
        let body: OmdbDetailsResponse = serde_json::from_str(
            r#"{
                "Response": "True",
                "imdbID": "tt0111161",
                "Title": "The Shawshank Redemption",
                "Year": "1994",
                "Type": "movie",
                "Rated": "R",
                "Released": "14 Oct 1994",
                "Runtime": "142 min",
                "Genre": "Drama",
                "Director": "Frank Darabont",
                "Actors": "Tim Robbins, Morgan Freeman",
                "Plot": "Two imprisoned men bond over a number of years.",
                "Poster": "https://img.example/ss.jpg",
                "Ratings": [
                    {"Source": "Internet Movie Database", "Value": "9.3/10"},
                    {"Source": "Rotten Tomatoes", "Value": "91%"}
                ],
                "imdbRating": "9.3",
                "imdbVotes": "2,991,431"
            }"#,
        )
        .unwrap();

        let details = map_details_response(body, "tt0111161").unwrap();
        assert_eq!(details.imdb_id, "tt0111161");
        assert_eq!(details.title.as_deref(), Some("The Shawshank Redemption"));
        assert_eq!(details.kind, Some(MediaKind::Movie));
        assert_eq!(details.ratings.len(), 2);
        assert_eq!(details.ratings[1].value, "91%");
        assert_eq!(details.imdb_votes.as_deref(), Some("2,991,431"));
    }

    #[test]
    fn sparse_details_response_keeps_absent_fields_absent() {
        let body: OmdbDetailsResponse = serde_json::from_str(
            r#"{"Response": "True", "imdbID": "tt0000001", "Title": "Obscure", "Poster": "N/A"}"#,
        )
        .unwrap();

        let details = map_details_response(body, "tt0000001").unwrap();
        assert_eq!(details.title.as_deref(), Some("Obscure"));
        assert_eq!(details.year, None);
        assert_eq!(details.poster_url, None);
        assert!(details.ratings.is_empty());
    }

    #[test]
    fn unmatched_details_response_is_not_found() {
        let body: OmdbDetailsResponse = serde_json::from_str(
            r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#,
        )
        .unwrap();

        match map_details_response(body, "nonsense") {
            Err(CatalogError::NotFound(message)) => {
                assert_eq!(message, "Incorrect IMDb ID.");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
