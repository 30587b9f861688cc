use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the remote catalog client.
///
/// `EmptyQuery` and `EmptyId` are rejected before any I/O happens.
/// `NotFound` is the provider explicitly reporting no match for an id
/// lookup and carries the provider's own message. `Transport` covers
/// everything that went wrong on the wire.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("search query cannot be empty")]
    EmptyQuery,
    #[error("movie id cannot be empty")]
    EmptyId,
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("catalog request failed with status {status}")]
    Status { status: StatusCode },
    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),
}
