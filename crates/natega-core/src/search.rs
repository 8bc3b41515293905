//! Search layer: normalised prefix match over the loaded record set.
//!
//! A record matches when its normalised name starts with the normalised
//! query, compared code point by code point. There is no ranking: matches
//! come back in dataset order.

use crate::normalizer::normalize;
use crate::types::{RecordSet, SearchResult};

/// Input rejected before any scan runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Please enter a student name")]
    EmptyQuery,
}

/// Reject queries that are empty or whitespace-only.
pub fn validate(query: &str) -> Result<(), SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(())
}

/// Search `records` for names starting with `query`.
///
/// Returns [`SearchError::EmptyQuery`] without touching `records` when the
/// query is blank, and [`SearchResult::NoMatch`] when nothing matches.
pub fn search(query: &str, records: &RecordSet) -> Result<SearchResult, SearchError> {
    validate(query)?;
    Ok(scan(&normalize(query), records))
}

/// Linear scan for an already-normalised prefix.
pub fn scan(prefix: &str, records: &RecordSet) -> SearchResult {
    let matches = records
        .keyed()
        .filter(|(key, _)| key.starts_with(prefix))
        .map(|(_, record)| record.clone())
        .collect();
    SearchResult::from_matches(matches)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
