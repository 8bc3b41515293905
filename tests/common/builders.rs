//! Builders for records, dataset JSON and zip archives.

use natega_core::{RecordSet, ResultRecord, SeatNumber};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Fluent builder for a single [`ResultRecord`].
///
/// ```rust
/// let r = record("أحمد علي").seat(101).score(350.0).build();
/// ```
pub struct RecordBuilder {
    seat_number: SeatNumber,
    name: String,
    score: f64,
    status: String,
}

pub fn record(name: &str) -> RecordBuilder {
    RecordBuilder {
        seat_number: SeatNumber::Number(1),
        name: name.to_string(),
        score: 300.0,
        status: "ناجح".to_string(),
    }
}

impl RecordBuilder {
    pub fn seat(mut self, seat: i64) -> Self {
        self.seat_number = SeatNumber::Number(seat);
        self
    }

    pub fn seat_text(mut self, seat: &str) -> Self {
        self.seat_number = SeatNumber::Text(seat.to_string());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn build(self) -> ResultRecord {
        ResultRecord {
            seat_number: self.seat_number,
            name: self.name,
            score: self.score,
            status: self.status,
        }
    }
}

/// One record per name, seat numbers counting up from 1000.
pub fn records_named(names: &[&str]) -> RecordSet {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| record(name).seat(1000 + i as i64).build())
        .collect()
}

/// Serialize records in the on-disk dataset shape.
pub fn dataset_json(records: &[ResultRecord]) -> String {
    serde_json::to_string(records).expect("records serialize")
}

// ---------------------------------------------------------------------------
// Archives
// ---------------------------------------------------------------------------

/// Builds an in-memory zip archive entry by entry.
#[derive(Default)]
pub struct ArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, name: &str, body: impl Into<Vec<u8>>) -> Self {
        self.entries.push((name.to_string(), body.into()));
        self
    }

    /// Add `natega.json` holding `records`.
    pub fn dataset(self, records: &[ResultRecord]) -> Self {
        self.entry("natega.json", dataset_json(records))
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in self.entries {
            zip.start_file(name, SimpleFileOptions::default())
                .expect("start zip entry");
            zip.write_all(&body).expect("write zip entry");
        }
        zip.finish().expect("finish zip").into_inner()
    }
}

/// Archive holding just `natega.json` with `records`.
pub fn archive_of(records: &[ResultRecord]) -> Vec<u8> {
    ArchiveBuilder::new().dataset(records).build()
}
