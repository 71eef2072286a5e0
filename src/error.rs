//! Error types for the `energy_directory` crate.

/// All errors that can occur while loading the company directory.
///
/// None of these escape [`CompanyFetcher::fetch`](crate::CompanyFetcher::fetch);
/// they are carried inside [`FetchOutcome::Fallback`](crate::FetchOutcome::Fallback)
/// so callers can see why the sample dataset was served.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The source could not be reached or read.
    #[error("Source request failed: {0}")]
    SourceRequest(Box<dyn std::error::Error + Send + Sync>),

    /// The source answered with a non-success HTTP status.
    #[error("Source returned HTTP status {0}")]
    SourceStatus(u16),

    /// The source answered with an empty or whitespace-only body.
    #[error("Source returned no data")]
    EmptyBody,

    /// The source had rows, but none of them mapped to a company.
    #[error("No usable rows in source data ({skipped} skipped)")]
    NoUsableRows { skipped: usize },

    /// The builder configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, DirectoryError>`.
pub type Result<T> = std::result::Result<T, DirectoryError>;
