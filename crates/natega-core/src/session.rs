//! Session: the state one front-end instance owns.
//!
//! A session starts in [`LoadState::Loading`], moves to `Ready` or `Failed`
//! exactly once per load attempt, and only accepts searches while `Ready`.
//! The record set lives behind an `Arc` so the dispatcher's tasks can read
//! it without copying.

use crate::config::SearchConfig;
use crate::dispatch::{SearchDispatcher, SearchReply};
use crate::error::LoadError;
use crate::search::SearchError;
use crate::types::RecordSet;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready {
        records: Arc<RecordSet>,
        loaded_at: DateTime<Utc>,
    },
    /// User-facing reason the dataset is unavailable.
    Failed(String),
}

/// Why a search could not be started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] SearchError),
    #[error("the results are still loading")]
    Loading,
    #[error("the results could not be loaded")]
    Unavailable,
}

pub struct Session {
    state: LoadState,
    dispatcher: Option<SearchDispatcher>,
    last_reply: Option<SearchReply>,
    min_latency: Duration,
}

impl Session {
    pub fn new(search: &SearchConfig) -> Self {
        Self {
            state: LoadState::Loading,
            dispatcher: None,
            last_reply: None,
            min_latency: search.min_latency(),
        }
    }

    /// Forget the current dataset and any results before a manual reload.
    pub fn begin_reload(&mut self) {
        tracing::info!("reloading dataset");
        self.state = LoadState::Loading;
        self.dispatcher = None;
        self.last_reply = None;
    }

    /// Record the outcome of a load attempt.
    ///
    /// Must be called inside a tokio runtime context: a successful load
    /// creates the search dispatcher, which spawns onto the current runtime.
    pub fn complete_load(&mut self, outcome: Result<RecordSet, LoadError>) {
        match outcome {
            Ok(records) => {
                tracing::info!(records = records.len(), "dataset ready");
                let records = Arc::new(records);
                self.dispatcher = Some(SearchDispatcher::new(Arc::clone(&records), self.min_latency));
                self.state = LoadState::Ready {
                    records,
                    loaded_at: Utc::now(),
                };
            }
            Err(err) => {
                tracing::error!(error = %err, "dataset load failed");
                self.dispatcher = None;
                self.state = LoadState::Failed(err.to_string());
            }
        }
        self.last_reply = None;
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn records(&self) -> Option<&Arc<RecordSet>> {
        match &self.state {
            LoadState::Ready { records, .. } => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// True while a submitted search has not produced its reply yet.
    pub fn is_searching(&self) -> bool {
        self.dispatcher.as_ref().is_some_and(SearchDispatcher::is_busy)
    }

    /// Start a search. The query is validated before the load state is
    /// consulted, so a blank query is reported the same way in every state.
    pub fn submit(&mut self, query: &str) -> Result<u64, SubmitError> {
        crate::search::validate(query)?;
        match (&self.state, self.dispatcher.as_mut()) {
            (LoadState::Ready { .. }, Some(dispatcher)) => Ok(dispatcher.submit(query)?),
            (LoadState::Loading, _) => Err(SubmitError::Loading),
            _ => Err(SubmitError::Unavailable),
        }
    }

    /// Pick up a finished search without blocking. Returns true when the
    /// displayed result changed.
    pub fn poll(&mut self) -> bool {
        match self.dispatcher.as_mut().and_then(SearchDispatcher::try_next) {
            Some(reply) => {
                self.last_reply = Some(reply);
                true
            }
            None => false,
        }
    }

    /// Wait until the latest submitted search has finished.
    pub async fn settle(&mut self) -> Option<&SearchReply> {
        if let Some(dispatcher) = self.dispatcher.as_mut() {
            if let Some(reply) = dispatcher.next().await {
                self.last_reply = Some(reply);
            }
        }
        self.last_reply.as_ref()
    }

    /// The most recent search result, or `None` when nothing has been
    /// searched since the dataset loaded.
    pub fn last_reply(&self) -> Option<&SearchReply> {
        self.last_reply.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
