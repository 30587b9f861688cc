use movie_explorer_catalog::{CatalogError, CatalogProvider, SearchOutcome};
use movie_explorer_models::MovieSummary;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

/// Fixed cap on visible results, regardless of the provider's total count.
pub const MAX_RESULTS: usize = 10;

/// What the user sees when a search fails on the wire. Raw transport
/// detail stays in the logs.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search movies. Please try again.";

/// What the user sees when the provider reports no matches without a reason.
pub const NO_RESULTS_MESSAGE: &str = "No movies found";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Results(Vec<MovieSummary>),
    Empty { message: String },
    Failed { message: String },
}

/// Render state for the search view, replaced wholesale on every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    /// The raw input text, updated on every keystroke.
    pub query: String,
    pub phase: SearchPhase,
    pub has_searched: bool,
}

impl SearchSession {
    fn idle() -> Self {
        Self {
            query: String::new(),
            phase: SearchPhase::Idle,
            has_searched: false,
        }
    }
}

enum Command {
    Input(String),
    Retry,
}

/// Handle for driving the orchestrator task.
#[derive(Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SearchHandle {
    /// Feed the current text of the search input. Resets the debounce timer.
    pub fn submit_query(&self, text: impl Into<String>) {
        let _ = self.commands.send(Command::Input(text.into()));
    }

    /// Re-issue the last debounced query, bypassing the debounce window.
    pub fn retry(&self) {
        let _ = self.commands.send(Command::Retry);
    }
}

/// Spawn the search state machine. The task ends when every handle is gone.
pub fn spawn(
    provider: Arc<dyn CatalogProvider>,
    debounce: Duration,
) -> (SearchHandle, watch::Receiver<SearchSession>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(SearchSession::idle());
    tokio::spawn(run(provider, debounce, command_rx, state_tx));
    (
        SearchHandle {
            commands: command_tx,
        },
        state_rx,
    )
}

type Settled = (u64, Result<SearchOutcome, CatalogError>);

async fn run(
    provider: Arc<dyn CatalogProvider>,
    debounce: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<SearchSession>,
) {
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<Settled>();
    let mut session = SearchSession::idle();
    // Requests are tagged with a sequence number; only the response for the
    // most recently issued request may touch visible state.
    let mut latest_seq: u64 = 0;
    let mut last_query: Option<String> = None;

    let timer = sleep_until(Instant::now());
    tokio::pin!(timer);
    let mut timer_armed = false;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Input(text)) => {
                    debug!(query = %text, "search input changed");
                    session.query = text;
                    publish(&state, &session);
                    timer.as_mut().reset(Instant::now() + debounce);
                    timer_armed = true;
                }
                Some(Command::Retry) => {
                    if let Some(query) = last_query.clone() {
                        info!(query = %query, "retrying last search");
                        issue(&provider, &settled_tx, &mut latest_seq, query, &mut session, &state);
                    } else {
                        warn!("retry requested but no query has been issued yet");
                    }
                }
                None => break,
            },
            () = &mut timer, if timer_armed => {
                timer_armed = false;
                let debounced = session.query.trim().to_string();
                if debounced.is_empty() {
                    debug!("debounced query is empty, resetting search");
                    // Anything still in flight is stale from here on.
                    latest_seq += 1;
                    session.phase = SearchPhase::Idle;
                    session.has_searched = false;
                    publish(&state, &session);
                } else {
                    last_query = Some(debounced.clone());
                    issue(&provider, &settled_tx, &mut latest_seq, debounced, &mut session, &state);
                }
            },
            Some((seq, outcome)) = settled_rx.recv() => {
                if seq != latest_seq {
                    debug!(seq, latest_seq, "discarding stale search response");
                    continue;
                }
                session.phase = reconcile(outcome);
                publish(&state, &session);
            },
        }
    }
}

fn issue(
    provider: &Arc<dyn CatalogProvider>,
    settled: &mpsc::UnboundedSender<Settled>,
    latest_seq: &mut u64,
    query: String,
    session: &mut SearchSession,
    state: &watch::Sender<SearchSession>,
) {
    *latest_seq += 1;
    let seq = *latest_seq;
    session.phase = SearchPhase::Loading;
    session.has_searched = true;
    publish(state, session);

    let provider = Arc::clone(provider);
    let settled = settled.clone();
    tokio::spawn(async move {
        debug!(seq, query = %query, "issuing search request");
        let outcome = provider.search_by_title(&query).await;
        let _ = settled.send((seq, outcome));
    });
}

fn reconcile(outcome: Result<SearchOutcome, CatalogError>) -> SearchPhase {
    match outcome {
        Ok(SearchOutcome::Matched {
            mut results,
            total_count,
        }) => {
            if results.is_empty() {
                // Providers have been seen returning the match flag with
                // zero items; treat that the same as an explicit no-match.
                return SearchPhase::Empty {
                    message: NO_RESULTS_MESSAGE.to_string(),
                };
            }
            results.truncate(MAX_RESULTS);
            info!(shown = results.len(), total = total_count, "search settled with results");
            SearchPhase::Results(results)
        }
        Ok(SearchOutcome::NoMatch { message }) => {
            let message = message.unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string());
            info!(message = %message, "search settled with no matches");
            SearchPhase::Empty { message }
        }
        Err(e) => {
            error!(error = %e, "search request failed");
            SearchPhase::Failed {
                message: SEARCH_FAILED_MESSAGE.to_string(),
            }
        }
    }
}

fn publish(state: &watch::Sender<SearchSession>, session: &SearchSession) {
    let _ = state.send(session.clone());
}
