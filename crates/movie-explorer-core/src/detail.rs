use movie_explorer_catalog::{CatalogError, CatalogProvider};
use movie_explorer_models::MovieDetails;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// What the user sees when a details lookup fails on the wire.
pub const DETAILS_FAILED_MESSAGE: &str = "Failed to fetch movie details. Please try again.";

/// Render state for the detail view. Opening a new view supersedes a
/// pending one; it never queues behind it.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailSession {
    Closed,
    Loading {
        imdb_id: String,
    },
    Loaded {
        imdb_id: String,
        details: MovieDetails,
    },
    Failed {
        imdb_id: String,
        message: String,
    },
}

enum Command {
    Open(String),
    Close,
}

#[derive(Clone)]
pub struct DetailHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl DetailHandle {
    pub fn open(&self, imdb_id: impl Into<String>) {
        let _ = self.commands.send(Command::Open(imdb_id.into()));
    }

    pub fn close(&self) {
        let _ = self.commands.send(Command::Close);
    }
}

/// Spawn the detail state machine. Independent lifecycle from search.
pub fn spawn(provider: Arc<dyn CatalogProvider>) -> (DetailHandle, watch::Receiver<DetailSession>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(DetailSession::Closed);
    tokio::spawn(run(provider, command_rx, state_tx));
    (
        DetailHandle {
            commands: command_tx,
        },
        state_rx,
    )
}

type Settled = (u64, String, Result<MovieDetails, CatalogError>);

async fn run(
    provider: Arc<dyn CatalogProvider>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<DetailSession>,
) {
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<Settled>();
    // Every open/close bumps the generation; a completion is applied only
    // while its generation is still current.
    let mut generation: u64 = 0;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Open(imdb_id)) => {
                    generation += 1;
                    let opened = generation;
                    info!(imdb_id = %imdb_id, "opening detail view");
                    let _ = state.send(DetailSession::Loading {
                        imdb_id: imdb_id.clone(),
                    });

                    let provider = Arc::clone(&provider);
                    let settled = settled_tx.clone();
                    tokio::spawn(async move {
                        let result = provider.fetch_details(&imdb_id).await;
                        let _ = settled.send((opened, imdb_id, result));
                    });
                }
                Some(Command::Close) => {
                    generation += 1;
                    debug!("closing detail view");
                    let _ = state.send(DetailSession::Closed);
                }
                None => break,
            },
            Some((opened, imdb_id, result)) = settled_rx.recv() => {
                if opened != generation {
                    debug!(opened, generation, imdb_id = %imdb_id, "discarding stale details response");
                    continue;
                }
                let next = match result {
                    Ok(details) => {
                        info!(imdb_id = %imdb_id, "details loaded");
                        DetailSession::Loaded { imdb_id, details }
                    }
                    Err(CatalogError::NotFound(message)) => {
                        warn!(imdb_id = %imdb_id, message = %message, "provider reported no match");
                        DetailSession::Failed { imdb_id, message }
                    }
                    Err(e) => {
                        error!(imdb_id = %imdb_id, error = %e, "details request failed");
                        DetailSession::Failed {
                            imdb_id,
                            message: DETAILS_FAILED_MESSAGE.to_string(),
                        }
                    }
                };
                let _ = state.send(next);
            },
        }
    }
}
