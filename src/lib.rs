//! natega: exam results lookup by student name.
//!
//! The binary fetches a zip archive holding the results dataset, decodes it
//! once, and answers prefix searches over Arabic student names, either in
//! the interactive TUI or as a one-shot headless query.
//!
//! # Architecture
//!
//! ```text
//! natega-source ──► natega-core ──► natega-tui
//!  (fetch, load)    (decode, search,    (ratatui shell)
//!                    session)  │
//!                              └──────► headless (this crate)
//! ```
//!
//! Only the headless runner lives in this crate; the binary in `main.rs`
//! picks between it and the TUI.

pub mod headless;
