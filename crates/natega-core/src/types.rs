//! Core types for natega-core.
//!
//! This module defines the data the rest of the pipeline passes around: a
//! single [`ResultRecord`], the loaded [`RecordSet`], and the
//! [`SearchResult`] returned by the search engine.

use crate::normalizer::normalize;
use serde::{Deserialize, Serialize};

/// Full marks for the exam. Percentages are derived from this, never stored.
pub const MAX_SCORE: f64 = 410.0;

/// A student's seat number. The dataset carries it either as a JSON number
/// or as a string, and both forms are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeatNumber {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatNumber::Number(n) => write!(f, "{n}"),
            SeatNumber::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for SeatNumber {
    fn from(n: i64) -> Self {
        SeatNumber::Number(n)
    }
}

impl From<&str> for SeatNumber {
    fn from(s: &str) -> Self {
        SeatNumber::Text(s.to_string())
    }
}

/// One exam result as stored in `natega.json`.
///
/// Every key is required: an element missing any of them fails the whole
/// load rather than being coerced to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "رقم الجلوس")]
    pub seat_number: SeatNumber,
    #[serde(rename = "الاسم")]
    pub name: String,
    /// Total score, 0–410.
    #[serde(rename = "الدرجة")]
    pub score: f64,
    /// Free-text status (pass, fail, absent, ...).
    #[serde(rename = "student_case_desc")]
    pub status: String,
}

impl ResultRecord {
    /// `score / 410 × 100`.
    pub fn percentage(&self) -> f64 {
        self.score / MAX_SCORE * 100.0
    }
}

/// The full decoded dataset, in file order.
///
/// Alongside the records the set keeps each name in normalised form so a
/// search only has to normalise the query. Duplicates are preserved.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<ResultRecord>,
    keys: Vec<String>,
}

impl RecordSet {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        let keys = records.iter().map(|r| normalize(&r.name)).collect();
        Self { records, keys }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResultRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ResultRecord] {
        &self.records
    }

    /// `(normalised name, record)` pairs in file order.
    pub(crate) fn keyed(&self) -> impl Iterator<Item = (&str, &ResultRecord)> {
        self.keys.iter().map(String::as_str).zip(self.records.iter())
    }
}

impl PartialEq for RecordSet {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl FromIterator<ResultRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = ResultRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Outcome of a search that passed validation.
///
/// `NoMatch` is distinct from an empty `Found` so a front-end
/// can tell "searched and found nothing" from "has not searched yet".
/// `Found` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Found(Vec<ResultRecord>),
    NoMatch,
}

impl SearchResult {
    pub(crate) fn from_matches(matches: Vec<ResultRecord>) -> Self {
        if matches.is_empty() {
            SearchResult::NoMatch
        } else {
            SearchResult::Found(matches)
        }
    }

    /// Matching records in dataset order; empty for `NoMatch`.
    pub fn records(&self) -> &[ResultRecord] {
        match self {
            SearchResult::Found(records) => records,
            SearchResult::NoMatch => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, SearchResult::NoMatch)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
