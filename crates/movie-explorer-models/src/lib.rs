pub mod details;
pub mod movie;

pub use details::{MovieDetails, SecondaryRating};
pub use movie::{MediaKind, MovieSummary};
