//! HTTP source for published spreadsheet exports (requires the `http` feature).

use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use crate::error::{DirectoryError, Result};
use crate::source::{DEFAULT_SOURCE_URL, Source};

/// Source that downloads CSV text with a plain `GET`.
///
/// Every request asks intermediaries not to serve a cached copy, since the
/// spreadsheet is edited in place. There is no retry and no timeout beyond
/// what the [`Client`] is configured with.
///
/// # Example
///
/// ```rust,no_run
/// use energy_directory::HttpSource;
///
/// let source = HttpSource::new("https://example.com/companies.csv");
/// ```
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a new `HttpSource` with a default [`Client`].
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create an `HttpSource` with an existing [`Client`], e.g. one with a
    /// custom timeout or proxy.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The URL this source fetches.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpSource {
    /// Source pointing at [`DEFAULT_SOURCE_URL`].
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL)
    }
}

impl Source for HttpSource {
    async fn fetch_text(&self) -> Result<String> {
        tracing::debug!("Fetching data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| DirectoryError::SourceRequest(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                "CSV fetch response error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            );
            return Err(DirectoryError::SourceStatus(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DirectoryError::SourceRequest(Box::new(e)))?;

        tracing::debug!("Fetched {} bytes from {}", text.len(), self.url);
        Ok(text)
    }
}
