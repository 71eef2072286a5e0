//! # energy_directory
//!
//! Data core of a renewable-energy company directory: fetches company rows
//! from a published spreadsheet export, turns them into typed [`Company`]
//! records, and offers pure filter, facet and lookup functions over the
//! resulting collection.
//!
//! ## Overview
//!
//! A [`CompanyFetcher`] pulls CSV text from a [`Source`], parses it with
//! [`csv::parse_csv`], and maps every data row through a [`RowMapper`]
//! configured by a [`SchemaMap`]. URL cells go through a [`UrlPolicy`];
//! anything unsafe becomes the `"#"` sentinel. If the source cannot be
//! used, the fetcher serves its fallback dataset instead, so a fetch always
//! yields something to render.
//!
//! The collection is then consumed with [`filter_companies`],
//! [`unique_filter_values`], [`get_by_id`], [`get_by_slug`] and
//! [`featured_companies`]. None of them modify their input.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use energy_directory::{
//!     filter_companies, CompanyFetcherBuilder, EnergyType, FilterSpec, HttpSource,
//! };
//!
//! # async fn example() -> energy_directory::Result<()> {
//! let fetcher = CompanyFetcherBuilder::new(HttpSource::default()).build()?;
//! let report = fetcher.fetch().await;
//!
//! if let Some(notice) = report.notice() {
//!     eprintln!("{}", notice.message);
//! }
//!
//! let spec = FilterSpec::from_query("type=wind&featured=true");
//! let wind = filter_companies(&report.companies, &spec);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `http` | **yes** | Enables [`HttpSource`] (via `reqwest`). |
//! | `rustls-tls` | no | Use `rustls` instead of the platform TLS for `reqwest`. |

pub mod company;
pub mod config;
pub mod csv;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod filter;
pub mod lookup;
pub mod mapper;
pub mod sanitizer;
pub mod schema;
pub mod source;

pub use company::{Company, EnergyType, SocialMedia};
pub use config::CompanyFetcherBuilder;
pub use error::{DirectoryError, Result};
pub use fetcher::{CompanyFetcher, FetchOutcome, FetchReport, FetchStats, Notice, NoticeLevel};
pub use filter::{FilterSpec, FilterValues, SearchScope, filter_companies, unique_filter_values};
pub use lookup::{FeaturedOverlay, featured_companies, generate_slug, get_by_id, get_by_slug};
pub use mapper::{RowMapper, RowOutcome};
pub use sanitizer::{
    ExtensionRule, KeywordDenylist, RejectReason, SENTINEL, SchemeDenylist, UrlPolicy, UrlRule,
    UrlVerdict, validate_url,
};
pub use schema::{Column, FeaturedEncoding, Field, ResolvedSchema, SchemaMap};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{DEFAULT_SOURCE_URL, FileSource, Source};
