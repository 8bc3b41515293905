//! Headless runner: one load, one search, printed to a writer.
//!
//! Output formats:
//!
//! - `table`: a tab-separated header line followed by one line per match,
//!   or `No results found`.
//! - `json`: an array of row objects (`[]` when nothing matched).

use clap::ValueEnum;
use natega_core::config::{Config, SearchConfig};
use natega_core::format::{self, ResultRow, COLUMN_HEADERS, NO_RESULTS_MESSAGE};
use natega_core::{LoadError, SearchResult, Session, SubmitError};
use natega_source::{loader_from_config, Fetcher, Loader};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl HeadlessError {
    /// Process exit status: 2 for a rejected query, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            HeadlessError::Submit(SubmitError::Invalid(_)) => 2,
            _ => 1,
        }
    }
}

/// JSON shape of one match. Score stays numeric; percentage keeps its `%`.
#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    index: usize,
    seat_number: &'a str,
    name: &'a str,
    score: f64,
    percentage: &'a str,
    status: &'a str,
}

/// Build the loader from `config.source` and run one query.
pub async fn run_with_config(
    config: &Config,
    query: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), HeadlessError> {
    // Reject a blank query before touching the network.
    natega_core::search::validate(query).map_err(SubmitError::from)?;
    let loader = loader_from_config(&config.source)?;
    run(&loader, &config.search, query, format, out).await
}

pub async fn run<F: Fetcher>(
    loader: &Loader<F>,
    search: &SearchConfig,
    query: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), HeadlessError> {
    natega_core::search::validate(query).map_err(SubmitError::from)?;

    let records = loader.load().await?;
    let mut session = Session::new(search);
    session.complete_load(Ok(records));
    session.submit(query)?;

    match session.settle().await.map(|reply| &reply.result) {
        Some(result) => write_result(result, format, out),
        None => write_result(&SearchResult::NoMatch, format, out),
    }
}

fn write_result(
    result: &SearchResult,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), HeadlessError> {
    let rows = format::rows(result);
    tracing::debug!(matches = rows.len(), ?format, "writing results");
    match format {
        OutputFormat::Table => write_table(&rows, out)?,
        OutputFormat::Json => write_json(result, &rows, out)?,
    }
    out.flush()?;
    Ok(())
}

fn write_table(rows: &[ResultRow], out: &mut dyn Write) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "{NO_RESULTS_MESSAGE}");
    }
    writeln!(out, "{}", COLUMN_HEADERS.join("\t"))?;
    for row in rows {
        writeln!(out, "{}", row.cells().join("\t"))?;
    }
    Ok(())
}

fn write_json(
    result: &SearchResult,
    rows: &[ResultRow],
    out: &mut dyn Write,
) -> Result<(), HeadlessError> {
    let json: Vec<JsonRow> = rows
        .iter()
        .zip(result.records())
        .map(|(row, record)| JsonRow {
            index: row.index,
            seat_number: &row.seat_number,
            name: &row.name,
            score: record.score,
            percentage: &row.percentage,
            status: &row.status,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}
