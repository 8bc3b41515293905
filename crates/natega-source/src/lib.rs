//! natega-source: dataset sources and the archive loader.
//!
//! A [`Fetcher`] retrieves the raw archive bytes from one kind of location;
//! the [`Loader`] wraps a fetcher with a timeout and hands the bytes to
//! [`natega_core::archive::decode_archive`]. [`loader_from_config`] picks
//! the fetcher from the configured location string.

pub mod file;
pub mod http;
pub mod loader;

pub use file::FileSource;
pub use http::HttpSource;
pub use loader::{loader_from_config, Loader};

use bytes::Bytes;
use natega_core::config::SourceConfig;
use natega_core::FetchError;
use std::future::Future;

/// Trait implemented by each archive source.
pub trait Fetcher: Send + Sync {
    /// Retrieve the complete archive. One attempt, no retries.
    fn fetch(&self) -> impl Future<Output = Result<Bytes, FetchError>> + Send;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// The source selected by a location string.
pub enum DatasetSource {
    Http(HttpSource),
    File(FileSource),
}

impl DatasetSource {
    /// `http://…` or `https://…` selects HTTP; `file://…` or anything
    /// without a scheme is a local path.
    pub fn from_config(cfg: &SourceConfig) -> Result<Self, FetchError> {
        let location = cfg.location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            let uri = location
                .parse()
                .map_err(|_| FetchError::InvalidLocation(location.to_string()))?;
            return Ok(DatasetSource::Http(HttpSource::new(uri, cfg.max_archive_bytes)));
        }
        if location.contains("://") && !location.starts_with("file://") {
            return Err(FetchError::InvalidLocation(location.to_string()));
        }
        let path = location.strip_prefix("file://").unwrap_or(location);
        if path.is_empty() {
            return Err(FetchError::InvalidLocation(cfg.location.clone()));
        }
        Ok(DatasetSource::File(FileSource::new(path, cfg.max_archive_bytes)))
    }
}

impl Fetcher for DatasetSource {
    async fn fetch(&self) -> Result<Bytes, FetchError> {
        match self {
            DatasetSource::Http(src) => src.fetch().await,
            DatasetSource::File(src) => src.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            DatasetSource::Http(src) => src.describe(),
            DatasetSource::File(src) => src.describe(),
        }
    }
}
