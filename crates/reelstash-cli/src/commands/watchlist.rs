use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_catalog::{CatalogProvider, OmdbClient};
use movie_explorer_config::{Config, PathManager};
use movie_explorer_core::{WatchlistManager, WatchlistStore};
use movie_explorer_models::MovieSummary;

use crate::output::Output;
use crate::WatchlistCommands;

pub async fn run(paths: &PathManager, out: &Output, cmd: WatchlistCommands) -> Result<()> {
    let store = WatchlistStore::new(paths.watchlist_file());
    let mut manager = WatchlistManager::new(store);

    match cmd {
        WatchlistCommands::List => {
            if manager.is_empty() {
                out.info("Watchlist is empty");
            } else {
                out.movie_table(manager.entries());
            }
        }
        WatchlistCommands::Add { imdb_id } => {
            if manager.contains(&imdb_id) {
                out.info(format!("{} is already in the watchlist", imdb_id));
                return Ok(());
            }
            let summary = fetch_summary(paths, out, &imdb_id).await?;
            let title = summary.title.clone();
            manager.add(summary);
            out.success(format!("Added \"{}\" to the watchlist", title));
        }
        WatchlistCommands::Remove { imdb_id } => {
            if !manager.contains(&imdb_id) {
                out.info(format!("{} is not in the watchlist", imdb_id));
                return Ok(());
            }
            manager.remove(&imdb_id);
            out.success(format!("Removed {} from the watchlist", imdb_id));
        }
        WatchlistCommands::Move { imdb_id, position } => {
            let mut new_order: Vec<MovieSummary> = manager.entries().to_vec();
            let from = new_order
                .iter()
                .position(|m| m.imdb_id == imdb_id)
                .ok_or_else(|| eyre!("{} is not in the watchlist", imdb_id))?;
            let entry = new_order.remove(from);
            let to = position.saturating_sub(1).min(new_order.len());
            new_order.insert(to, entry);
            manager.reorder(new_order);
            out.success(format!("Moved {} to position {}", imdb_id, to + 1));
        }
        WatchlistCommands::Clear => {
            manager.clear();
            out.success("Watchlist cleared");
        }
    }

    Ok(())
}

async fn fetch_summary(paths: &PathManager, out: &Output, imdb_id: &str) -> Result<MovieSummary> {
    let config = Config::load(paths).map_err(|e| eyre!("{}", e))?;
    let api_key = config
        .require_api_key()
        .map_err(|e| eyre!("{}", e))?
        .to_string();
    let provider = OmdbClient::with_base_url(config.catalog.base_url.clone(), api_key);

    let spinner = out.spinner("Fetching details...");
    let details = provider.fetch_details(imdb_id).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let details = details.map_err(|e| eyre!("{}", e))?;
    details
        .to_summary()
        .ok_or_else(|| eyre!("provider returned an incomplete record for {}", imdb_id))
}
