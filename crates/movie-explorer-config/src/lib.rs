pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, SearchConfig, API_KEY_ENV};
pub use paths::{container_base_path, PathManager};
