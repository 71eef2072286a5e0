//! Local file source.

use std::path::PathBuf;

use crate::error::{DirectoryError, Result};
use crate::source::Source;

/// Source that reads a CSV snapshot from the local filesystem.
///
/// # Example
///
/// ```rust,no_run
/// use energy_directory::FileSource;
///
/// let source = FileSource::new("data/companies.csv");
/// ```
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new `FileSource` for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    async fn fetch_text(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DirectoryError::SourceRequest(Box::new(e)))?;

        tracing::debug!("Read {} bytes from {}", text.len(), self.path.display());
        Ok(text)
    }
}
