//! Local file source.

use crate::Fetcher;
use bytes::Bytes;
use natega_core::FetchError;
use std::path::{Path, PathBuf};

pub struct FileSource {
    path: PathBuf,
    max_bytes: u64,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_bytes,
        }
    }

    fn io_error(&self, source: std::io::Error) -> FetchError {
        FetchError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Fetcher for FileSource {
    async fn fetch(&self) -> Result<Bytes, FetchError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        if meta.len() > self.max_bytes {
            return Err(FetchError::TooLarge { limit: self.max_bytes });
        }
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), bytes = data.len(), "archive read");
        Ok(Bytes::from(data))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("natega.zip");
        std::fs::write(&path, b"PK\x05\x06").unwrap();

        let bytes = FileSource::new(&path, 1024).fetch().await.unwrap();
        assert_eq!(&bytes[..], b"PK\x05\x06");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.zip"), 1024)
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }), "{err:?}");
        assert!(err.to_string().contains("nope.zip"));
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("natega.zip");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let err = FileSource::new(&path, 16).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::TooLarge { limit: 16 }), "{err:?}");
    }
}
