//! Loader: fetch, time-box, decode.

use crate::{DatasetSource, Fetcher};
use natega_core::archive::{decode_archive, ArchiveOptions};
use natega_core::config::SourceConfig;
use natega_core::{FetchError, LoadError, RecordSet};
use std::time::{Duration, Instant};

pub struct Loader<F> {
    fetcher: F,
    archive: ArchiveOptions,
    timeout: Duration,
}

impl<F: Fetcher> Loader<F> {
    pub fn new(fetcher: F, archive: ArchiveOptions, timeout: Duration) -> Self {
        Self { fetcher, archive, timeout }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// One load attempt. The timeout covers the fetch only; decoding runs
    /// on the blocking pool once the bytes are in memory.
    pub async fn load(&self) -> Result<RecordSet, LoadError> {
        let started = Instant::now();
        tracing::info!(source = %self.fetcher.describe(), "fetching archive");

        let bytes = tokio::time::timeout(self.timeout, self.fetcher.fetch())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))??;
        tracing::info!(bytes = bytes.len(), "archive retrieved");

        let opts = self.archive.clone();
        let records = tokio::task::spawn_blocking(move || decode_archive(&bytes, &opts))
            .await
            .map_err(|e| LoadError::Decompress(e.to_string()))??;

        tracing::info!(
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );
        Ok(records)
    }
}

/// Build the loader described by the `[source]` config section.
pub fn loader_from_config(cfg: &SourceConfig) -> Result<Loader<DatasetSource>, LoadError> {
    let source = DatasetSource::from_config(cfg)?;
    Ok(Loader::new(source, cfg.archive_options(), cfg.timeout()))
}
