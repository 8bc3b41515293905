//! natega-core: exam results lookup core library.
//!
//! This crate holds everything that does not touch the network or the
//! terminal: the record types, the Arabic name normalizer, the prefix search,
//! archive decoding, configuration, and the session state shared by the TUI
//! and headless front-ends.
//!
//! # Architecture
//!
//! ```text
//! Source ──► Archive ──► RecordSet ──► Search ──► UI / headless
//!                            │            ▲
//!                            └─ Session ──┘ (dispatcher, last-write-wins)
//! ```
//!
//! The record set is loaded once, wrapped in an `Arc`, and only read after
//! that. Search replies travel back to the session over a `tokio` channel.

pub mod archive;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod normalizer;
pub mod search;
pub mod session;
pub mod types;

pub use error::{FetchError, LoadError};
pub use search::{search, SearchError};
pub use session::{LoadState, Session, SubmitError};
pub use types::{RecordSet, ResultRecord, SearchResult, SeatNumber, MAX_SCORE};
