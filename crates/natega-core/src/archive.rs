//! Archive decoding: zip bytes to a [`RecordSet`].
//!
//! The whole archive is held in memory. Only the dataset entry is
//! decompressed, and its uncompressed size is capped before and while it is
//! read so a crafted archive cannot blow up memory.

use crate::error::LoadError;
use crate::types::{RecordSet, ResultRecord};
use std::io::{Cursor, Read};
use zip::{result::ZipError, ZipArchive};

/// Name of the dataset entry inside the archive.
pub const DATASET_ENTRY: &str = "natega.json";

/// What to pull out of the archive and how much of it to accept.
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    pub entry: String,
    pub max_entry_bytes: u64,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            entry: DATASET_ENTRY.to_string(),
            max_entry_bytes: 256 * 1024 * 1024,
        }
    }
}

/// Decompress `bytes`, locate the dataset entry and parse it.
pub fn decode_archive(bytes: &[u8], opts: &ArchiveOptions) -> Result<RecordSet, LoadError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| LoadError::Decompress(e.to_string()))?;

    tracing::debug!(entries = archive.len(), "archive opened");
    if archive.len() == 0 {
        return Err(LoadError::EmptyArchive);
    }

    let mut file = match archive.by_name(&opts.entry) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(LoadError::MissingEntry(opts.entry.clone())),
        Err(e) => return Err(LoadError::Decompress(e.to_string())),
    };

    let too_large = || LoadError::EntryTooLarge {
        entry: opts.entry.clone(),
        limit: opts.max_entry_bytes,
    };
    if file.size() > opts.max_entry_bytes {
        return Err(too_large());
    }

    // The header size can lie; bound the actual read as well.
    let mut buf = Vec::with_capacity(file.size() as usize);
    (&mut file)
        .take(opts.max_entry_bytes + 1)
        .read_to_end(&mut buf)
        .map_err(|e| LoadError::Decompress(e.to_string()))?;
    if buf.len() as u64 > opts.max_entry_bytes {
        return Err(too_large());
    }

    let text = std::str::from_utf8(&buf)
        .map_err(|e| LoadError::Parse(format!("{} is not valid UTF-8: {e}", opts.entry)))?;
    parse_dataset(text)
}

/// Parse the dataset JSON (an array of records). A leading byte-order mark
/// is ignored.
pub fn parse_dataset(text: &str) -> Result<RecordSet, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let records: Vec<ResultRecord> =
        serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
    tracing::debug!(records = records.len(), "dataset parsed");
    Ok(RecordSet::new(records))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
