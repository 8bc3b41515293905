//! Search dispatcher: runs searches off the caller's thread with
//! last-write-wins delivery.
//!
//! Every [`SearchDispatcher::submit`] bumps a generation counter, cancels the
//! task of the previous submission and spawns a new one. Replies arrive on an
//! unbounded `tokio` channel; any reply whose generation is not the latest
//! one is dropped on receipt, so a slow old query can never overwrite the
//! result of a newer one even if its task finished before it was cancelled.

use crate::normalizer::normalize;
use crate::search::{self, SearchError};
use crate::types::{RecordSet, SearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A completed search, tagged with the submission it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReply {
    pub generation: u64,
    pub query: String,
    pub result: SearchResult,
}

struct PendingSearch {
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

pub struct SearchDispatcher {
    records: Arc<RecordSet>,
    min_latency: Duration,
    runtime: Handle,
    /// Generation of the most recent submission.
    issued: u64,
    /// Generation of the most recent reply handed to the caller.
    delivered: u64,
    pending: Option<PendingSearch>,
    tx: mpsc::UnboundedSender<SearchReply>,
    rx: mpsc::UnboundedReceiver<SearchReply>,
}

impl SearchDispatcher {
    /// Create a dispatcher that spawns onto the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime context.
    pub fn new(records: Arc<RecordSet>, min_latency: Duration) -> Self {
        Self::with_handle(records, min_latency, Handle::current())
    }

    pub fn with_handle(records: Arc<RecordSet>, min_latency: Duration, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            records,
            min_latency,
            runtime,
            issued: 0,
            delivered: 0,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn records(&self) -> &Arc<RecordSet> {
        &self.records
    }

    /// Start a search for `query`, superseding any search still in flight.
    ///
    /// Blank queries are rejected here, synchronously, and never reach a task.
    pub fn submit(&mut self, query: &str) -> Result<u64, SearchError> {
        search::validate(query)?;

        if let Some(prev) = self.pending.take() {
            tracing::debug!(generation = self.issued, "cancelling superseded search");
            prev.cancel.cancel();
        }

        self.issued += 1;
        let generation = self.issued;
        let cancel = CancellationToken::new();
        let task = self.runtime.spawn(run_search(
            generation,
            query.to_string(),
            Arc::clone(&self.records),
            self.min_latency,
            cancel.clone(),
            self.tx.clone(),
        ));
        self.pending = Some(PendingSearch { cancel, _task: task });

        tracing::debug!(generation, query, "search submitted");
        Ok(generation)
    }

    /// True while the latest submission has not been delivered yet.
    pub fn is_busy(&self) -> bool {
        self.delivered < self.issued
    }

    /// Non-blocking: return the reply for the latest submission if it has
    /// arrived. Stale replies are discarded along the way.
    pub fn try_next(&mut self) -> Option<SearchReply> {
        while let Ok(reply) = self.rx.try_recv() {
            if let Some(reply) = self.accept(reply) {
                return Some(reply);
            }
        }
        None
    }

    /// Wait for the reply to the latest submission. Returns `None` right away
    /// when nothing is outstanding.
    pub async fn next(&mut self) -> Option<SearchReply> {
        while self.is_busy() {
            let reply = self.rx.recv().await?;
            if let Some(reply) = self.accept(reply) {
                return Some(reply);
            }
        }
        None
    }

    fn accept(&mut self, reply: SearchReply) -> Option<SearchReply> {
        if reply.generation != self.issued {
            tracing::debug!(
                generation = reply.generation,
                latest = self.issued,
                "dropping stale search reply"
            );
            return None;
        }
        self.delivered = reply.generation;
        self.pending = None;
        Some(reply)
    }
}

impl Drop for SearchDispatcher {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
        }
    }
}

async fn run_search(
    generation: u64,
    query: String,
    records: Arc<RecordSet>,
    min_latency: Duration,
    cancel: CancellationToken,
    tx: mpsc::UnboundedSender<SearchReply>,
) {
    let started = tokio::time::Instant::now();
    let result = search::scan(&normalize(&query), &records);

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(generation, "search cancelled");
            return;
        }
        _ = tokio::time::sleep_until(started + min_latency) => {}
    }

    tracing::debug!(generation, matches = result.len(), "search finished");
    // The receiver is gone only when the dispatcher itself was dropped.
    let _ = tx.send(SearchReply { generation, query, result });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
