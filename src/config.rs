//! Builder for configuring a [`CompanyFetcher`].

use crate::company::Company;
use crate::error::Result;
use crate::fallback;
use crate::fetcher::CompanyFetcher;
use crate::sanitizer::UrlPolicy;
use crate::schema::SchemaMap;
use crate::source::Source;

/// Builder for configuring a [`CompanyFetcher`].
///
/// Provides a fluent API for the source layout, the URL policy and the
/// dataset served when the source cannot be used.
///
/// # Example
///
/// ```rust,no_run
/// use energy_directory::{CompanyFetcherBuilder, FileSource, SchemaMap, UrlPolicy};
///
/// # async fn example() -> energy_directory::Result<()> {
/// let fetcher = CompanyFetcherBuilder::new(FileSource::new("companies.csv"))
///     .schema(SchemaMap::sheet_api())
///     .url_policy(UrlPolicy::strict())
///     .build()?;
///
/// let report = fetcher.fetch().await;
/// if let Some(notice) = report.notice() {
///     eprintln!("{}", notice.message);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CompanyFetcherBuilder<S: Source> {
    source: S,
    schema: SchemaMap,
    policy: UrlPolicy,
    fallback: Vec<Company>,
}

impl<S: Source> CompanyFetcherBuilder<S> {
    /// Create a new builder with the given source and sensible defaults.
    ///
    /// Defaults: [`SchemaMap::sheet_export`], [`UrlPolicy::default`], and
    /// [`fallback::sample_companies`] as the fallback dataset.
    pub fn new(source: S) -> Self {
        Self {
            source,
            schema: SchemaMap::sheet_export(),
            policy: UrlPolicy::default(),
            fallback: fallback::sample_companies(),
        }
    }

    /// Column layout of the source.
    pub fn schema(mut self, schema: SchemaMap) -> Self {
        self.schema = schema;
        self
    }

    /// Policy applied to every URL cell.
    pub fn url_policy(mut self, policy: UrlPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Dataset returned whenever the live source cannot be used.
    pub fn fallback(mut self, companies: Vec<Company>) -> Self {
        self.fallback = companies;
        self
    }

    /// Validate the configuration and return the [`CompanyFetcher`].
    ///
    /// Fails with [`DirectoryError::Config`](crate::DirectoryError::Config)
    /// if the fallback dataset is empty or would not survive the pipeline's
    /// own checks, since it must always be safe to render.
    pub fn build(self) -> Result<CompanyFetcher<S>> {
        fallback::validate_dataset(&self.fallback, &self.policy)?;
        Ok(CompanyFetcher::new(
            self.source,
            self.schema,
            self.policy,
            self.fallback,
        ))
    }
}
