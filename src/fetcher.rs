//! The fetch pipeline: source text to a company collection.
//!
//! [`CompanyFetcher::fetch`] never fails. Anything that prevents a usable
//! live collection (an unreachable source, a bad status, an empty body, or
//! a body where no row maps) yields the fallback dataset instead, with the
//! cause kept in [`FetchOutcome::Fallback`].

use crate::company::Company;
use crate::csv::parse_csv;
use crate::error::DirectoryError;
use crate::mapper::{RowMapper, RowOutcome};
use crate::sanitizer::UrlPolicy;
use crate::schema::SchemaMap;
use crate::source::Source;

const FALLBACK_NOTICE: &str =
    "Could not load company data from the server. Showing sample data instead.";

/// Whether a report carries live data or the fallback dataset.
#[derive(Debug)]
pub enum FetchOutcome {
    Live,
    Fallback(DirectoryError),
}

/// Counters gathered while mapping the source rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Data rows seen after the header rows.
    pub rows_read: usize,
    /// Rows skipped for having too few fields.
    pub skipped_rows: usize,
    /// URL cells replaced by the sentinel.
    pub sanitized_urls: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Severity of a [`Notice`].
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A single user-facing, non-blocking message about a fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Everything a fetch produced.
#[derive(Debug)]
pub struct FetchReport {
    /// Companies in source row order, or the fallback dataset.
    pub companies: Vec<Company>,
    pub outcome: FetchOutcome,
    pub stats: FetchStats,
}

impl FetchReport {
    /// Returns `true` if the companies came from the source.
    pub fn is_live(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Live)
    }

    /// The one notice to show for this fetch, if any.
    ///
    /// A fallback always produces an error notice. Otherwise skipped rows
    /// and blocked URLs are folded into a single warning.
    pub fn notice(&self) -> Option<Notice> {
        if !self.is_live() {
            return Some(Notice {
                level: NoticeLevel::Error,
                message: FALLBACK_NOTICE.to_string(),
            });
        }

        let mut parts = Vec::new();
        if self.stats.sanitized_urls > 0 {
            parts.push(format!(
                "{} potentially unsafe {} blocked for security reasons.",
                self.stats.sanitized_urls,
                plural(self.stats.sanitized_urls, "URL was", "URLs were"),
            ));
        }
        if self.stats.skipped_rows > 0 {
            parts.push(format!(
                "{} {} skipped because of insufficient data.",
                self.stats.skipped_rows,
                plural(self.stats.skipped_rows, "row was", "rows were"),
            ));
        }

        (!parts.is_empty()).then(|| Notice {
            level: NoticeLevel::Warning,
            message: parts.join(" "),
        })
    }

    /// Consume the report and keep only the companies.
    pub fn into_companies(self) -> Vec<Company> {
        self.companies
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

/// Loads the company collection from a [`Source`].
///
/// Built with [`CompanyFetcherBuilder`](crate::CompanyFetcherBuilder).
pub struct CompanyFetcher<S: Source> {
    source: S,
    schema: SchemaMap,
    policy: UrlPolicy,
    fallback: Vec<Company>,
}

impl<S: Source> CompanyFetcher<S> {
    /// Use [`CompanyFetcherBuilder::build`](crate::CompanyFetcherBuilder::build).
    pub(crate) fn new(
        source: S,
        schema: SchemaMap,
        policy: UrlPolicy,
        fallback: Vec<Company>,
    ) -> Self {
        Self {
            source,
            schema,
            policy,
            fallback,
        }
    }

    /// Fetch the source once and run the pipeline on its text.
    pub async fn fetch(&self) -> FetchReport {
        match self.source.fetch_text().await {
            Ok(text) => self.ingest(&text),
            Err(e) => self.fall_back(e, FetchStats::default()),
        }
    }

    /// Run the parse and map steps on already-fetched text.
    pub fn ingest(&self, text: &str) -> FetchReport {
        if text.trim().is_empty() {
            return self.fall_back(DirectoryError::EmptyBody, FetchStats::default());
        }

        let rows = parse_csv(text);
        let header_rows = self.schema.header_row_count();
        let header: &[String] = match rows.first() {
            Some(first) if header_rows > 0 => first,
            _ => &[],
        };
        tracing::debug!(?header, "CSV headers");

        let mapper = RowMapper::new(&self.schema, header, &self.policy);
        let mut stats = FetchStats::default();
        let mut companies = Vec::new();

        for (index, row) in rows.iter().skip(header_rows).enumerate() {
            stats.rows_read += 1;
            match mapper.map_row(row, index) {
                RowOutcome::Mapped {
                    company,
                    rejected_urls,
                } => {
                    stats.sanitized_urls += rejected_urls;
                    companies.push(company);
                }
                RowOutcome::Insufficient { .. } => stats.skipped_rows += 1,
            }
        }

        if companies.is_empty() {
            let error = DirectoryError::NoUsableRows {
                skipped: stats.skipped_rows,
            };
            return self.fall_back(error, stats);
        }

        if stats.sanitized_urls > 0 {
            tracing::warn!("Blocked {} potentially unsafe URLs", stats.sanitized_urls);
        }
        if stats.skipped_rows > 0 {
            tracing::warn!("Skipped {} rows with insufficient data", stats.skipped_rows);
        }
        tracing::debug!("Successfully fetched {} companies", companies.len());

        FetchReport {
            companies,
            outcome: FetchOutcome::Live,
            stats,
        }
    }

    fn fall_back(&self, error: DirectoryError, stats: FetchStats) -> FetchReport {
        tracing::error!("Error fetching company data, using sample data: {error}");
        FetchReport {
            companies: self.fallback.clone(),
            outcome: FetchOutcome::Fallback(error),
            stats,
        }
    }
}
