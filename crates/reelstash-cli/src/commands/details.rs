use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_catalog::OmdbClient;
use movie_explorer_config::{Config, PathManager};
use movie_explorer_core::{DetailSession, ExplorerApp, WatchlistStore};
use std::sync::Arc;

use crate::output::Output;

pub async fn run(paths: &PathManager, out: &Output, imdb_id: &str) -> Result<()> {
    let config = Config::load(paths).map_err(|e| eyre!("{}", e))?;
    let api_key = config
        .require_api_key()
        .map_err(|e| eyre!("{}", e))?
        .to_string();
    let provider = Arc::new(OmdbClient::with_base_url(
        config.catalog.base_url.clone(),
        api_key,
    ));
    let app = ExplorerApp::new(
        provider,
        WatchlistStore::new(paths.watchlist_file()),
        config.debounce(),
    );

    app.open_detail(imdb_id);

    let spinner = out.spinner("Fetching details...");
    let mut state = app.detail_state();
    let session = loop {
        {
            let current = state.borrow_and_update();
            match &*current {
                DetailSession::Loaded { .. } | DetailSession::Failed { .. } => {
                    break current.clone();
                }
                DetailSession::Closed | DetailSession::Loading { .. } => {}
            }
        }
        state
            .changed()
            .await
            .map_err(|_| eyre!("detail task ended unexpectedly"))?;
    };
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match session {
        DetailSession::Loaded { details, .. } => out.details_view(&details),
        DetailSession::Failed { message, .. } => out.error(message),
        DetailSession::Closed | DetailSession::Loading { .. } => {}
    }

    app.close_detail();
    app.shutdown();
    Ok(())
}
