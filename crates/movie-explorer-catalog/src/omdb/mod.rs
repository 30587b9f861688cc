pub mod api;
pub mod client;

pub use client::{OmdbClient, DEFAULT_BASE_URL};
