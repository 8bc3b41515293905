//! Load-phase error taxonomy.
//!
//! Every variant renders as a sentence a user can read directly; the TUI and
//! the headless runner show `Display` output verbatim.

use std::path::PathBuf;
use std::time::Duration;

/// Failure while retrieving the archive bytes.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status. `reason` is the
    /// status text, empty when the server sent none and the code has no
    /// standard one.
    #[error("{}", status_line(.code, .reason))]
    Status { code: u16, reason: String },
    /// Connection-level failure (DNS, refused, reset, malformed response).
    #[error("{0}")]
    Transport(String),
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("archive is larger than the {limit} byte download limit")]
    TooLarge { limit: u64 },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported source location `{0}`")]
    InvalidLocation(String),
}

fn status_line(code: &u16, reason: &str) -> String {
    if reason.is_empty() {
        code.to_string()
    } else {
        format!("{code} {reason}")
    }
}

/// Why the dataset could not be made available for searching.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to fetch the ZIP file: {0}")]
    Fetch(#[from] FetchError),
    #[error("Error extracting file: {0}")]
    Decompress(String),
    #[error("No files found in the ZIP archive.")]
    EmptyArchive,
    #[error("No {0} file found in the archive.")]
    MissingEntry(String),
    #[error("{entry} is larger than the {limit} byte limit")]
    EntryTooLarge { entry: String, limit: u64 },
    #[error("Invalid dataset: {0}")]
    Parse(String),
}
