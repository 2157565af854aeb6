use shared_types::{FilterCriteria, Record, SearchConfig, SearchOutcome, SearchState};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::store::{RecordSource, RecordStore, Stored};

/// Timing of a [`SearchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiet period after the last submission before the search runs.
    pub debounce: Duration,
    /// Simulated backend latency added before results are published.
    pub latency: Duration,
}

impl From<SearchConfig> for SearchSettings {
    fn from(config: SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            latency: Duration::from_millis(config.latency_ms),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchConfig::default().into()
    }
}

/// A debounced, cancellable search over one record source.
///
/// Each `submit` supersedes the previous one: the pending run is aborted
/// and only the newest generation may publish. Observers follow progress
/// through [`SearchSession::subscribe`].
pub struct SearchSession<T: Record> {
    source: Arc<dyn RecordSource<T>>,
    settings: SearchSettings,
    state: Arc<watch::Sender<SearchState<T>>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Record> SearchSession<T> {
    pub fn new(source: Arc<dyn RecordSource<T>>, settings: SearchSettings) -> Self {
        let (tx, _rx) = watch::channel(SearchState::new());
        Self {
            source,
            settings,
            state: Arc::new(tx),
            pending: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// Start a search for `criteria`, replacing any search still pending.
    /// Must be called from within a Tokio runtime. Returns the generation
    /// assigned to this submission.
    pub fn submit(&self, criteria: FilterCriteria) -> u64 {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let generation = self.state.borrow().generation + 1;
        self.state.send_modify(|s| s.begin(generation));

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let delay = self.settings.debounce + self.settings.latency;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let outcome = match source.snapshot() {
                Ok(records) => SearchOutcome::from_results(shared_types::filter(&records, &criteria)),
                Err(e) => {
                    tracing::warn!(error = %e, kind = T::KIND.as_str(), "search source failed");
                    SearchOutcome::Failed(e)
                }
            };

            state.send_if_modified(|s| s.complete(generation, outcome));
        }));

        generation
    }

    /// Abort the pending search, if any, and return to idle.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        self.state.send_modify(|s| s.reset());
    }

    /// Current state snapshot.
    pub fn state(&self) -> SearchState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState<T>> {
        self.state.subscribe()
    }

    /// Wait until no search is loading and return that state.
    pub async fn settled(&self) -> SearchState<T> {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|s| !s.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }
}

impl<T: Stored> SearchSession<T> {
    /// A session over the shared store, timed by the `[search]` config section.
    pub fn for_store(store: Arc<RecordStore>) -> Self {
        Self::new(store, crate::config::search_config().into())
    }
}

impl<T: Record> Drop for SearchSession<T> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
