//! Pluggable sources of raw CSV text.
//!
//! The crate ships with two built-in sources:
//!
//! - [`HttpSource`] -- fetches a published spreadsheet export over HTTP
//!   (requires the `http` feature).
//! - [`FileSource`] -- reads a local CSV snapshot.
//!
//! Implement the [`Source`] trait to add your own.

mod fs;
#[cfg(feature = "http")]
mod http;

pub use fs::FileSource;
#[cfg(feature = "http")]
pub use http::HttpSource;

use crate::error::Result;

use std::future::Future;

/// Published CSV export of the directory spreadsheet.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTH5EqgU9fQ8dqF9THZdMpGa4HpCeBEBzQfbx2OPcj1tJgr3WoveJdaHzRWFrVngcW-S_XFexZiPgGW/pub?output=csv";

/// Trait for anything that can produce the raw tabular text.
///
/// Implementations must be `Send + Sync + 'static` so a
/// [`CompanyFetcher`](crate::CompanyFetcher) can be shared across tasks.
/// A source is called once per fetch and is never retried.
///
/// # Implementing a custom source
///
/// ```rust,no_run
/// use energy_directory::{Result, Source};
///
/// struct Inline(&'static str);
///
/// impl Source for Inline {
///     async fn fetch_text(&self) -> Result<String> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
pub trait Source: Send + Sync + 'static {
    /// Return the full CSV text of the source.
    fn fetch_text(&self) -> impl Future<Output = Result<String>> + Send;
}
