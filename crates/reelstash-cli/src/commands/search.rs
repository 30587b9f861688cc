use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_catalog::OmdbClient;
use movie_explorer_config::{Config, PathManager};
use movie_explorer_core::search::{SearchPhase, SearchSession};
use movie_explorer_core::{ExplorerApp, WatchlistStore};
use std::sync::Arc;

use crate::output::Output;

pub async fn run(paths: &PathManager, out: &Output, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(eyre!("search query cannot be empty"));
    }

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

    app.submit_query(query);

    let spinner = out.spinner("Searching...");
    let mut state = app.search_state();
    let session = wait_for_settled(&mut state).await?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match session.phase {
        SearchPhase::Results(movies) => {
            out.success(format!("{} result(s) for \"{}\"", movies.len(), query));
            out.movie_table(&movies);
        }
        SearchPhase::Empty { message } => {
            out.info(message);
        }
        SearchPhase::Failed { message } => {
            out.error(message);
        }
        SearchPhase::Idle | SearchPhase::Loading => {}
    }

    app.shutdown();
    Ok(())
}

async fn wait_for_settled(
    state: &mut tokio::sync::watch::Receiver<SearchSession>,
) -> Result<SearchSession> {
    loop {
        {
            let current = state.borrow_and_update();
            match current.phase {
                SearchPhase::Results(_)
                | SearchPhase::Empty { .. }
                | SearchPhase::Failed { .. } => return Ok(current.clone()),
                SearchPhase::Idle | SearchPhase::Loading => {}
            }
        }
        state
            .changed()
            .await
            .map_err(|_| eyre!("search task ended unexpectedly"))?;
    }
}
