//! Point lookups and projections over a company collection.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::company::Company;

static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

const SLUG_SUFFIX: &str = ".html";

/// Build the detail-page slug for a company name.
///
/// ```
/// use energy_directory::generate_slug;
///
/// assert_eq!(generate_slug("Sun & Wind  Co."), "sun-wind-co.html");
/// ```
pub fn generate_slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    format!("{collapsed}{SLUG_SUFFIX}")
}

/// Lowercase, drop a leading `/` and a trailing `.html`.
fn canonical_slug(slug: &str) -> String {
    let lower = slug.trim().trim_start_matches('/').to_lowercase();
    match lower.strip_suffix(SLUG_SUFFIX) {
        Some(bare) => bare.to_string(),
        None => lower,
    }
}

/// Find a company by its id.
pub fn get_by_id<'a>(companies: &'a [Company], id: &str) -> Option<&'a Company> {
    companies.iter().find(|c| c.id == id)
}

/// Find a company by slug. `acme-solar`, `acme-solar.html` and
/// `/Acme-Solar.HTML` all resolve to the same company.
pub fn get_by_slug<'a>(companies: &'a [Company], slug: &str) -> Option<&'a Company> {
    let wanted = canonical_slug(slug);
    companies
        .iter()
        .find(|c| canonical_slug(&generate_slug(&c.name)) == wanted)
}

/// Featured companies sorted by name.
///
/// Names compare case-insensitively first, so `acme` sorts next to `Acme`
/// rather than after every capitalized name.
pub fn featured_companies(companies: &[Company]) -> Vec<Company> {
    let mut featured: Vec<Company> = companies.iter().filter(|c| c.featured).cloned().collect();
    featured.sort_by(|a, b| compare_names(&a.name, &b.name));
    featured
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Featured status granted outside the source data, e.g. right after a
/// listing upgrade that the spreadsheet does not show yet.
///
/// The overlay never touches the collection it is applied to; it returns
/// copies with the flag set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeaturedOverlay {
    ids: HashSet<String>,
}

impl FeaturedOverlay {
    /// Create an overlay that promotes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a company id as featured.
    pub fn promote(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Returns `true` if `id` has been promoted.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if no id has been promoted.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Effective featured status of `company` under this overlay.
    pub fn is_featured(&self, company: &Company) -> bool {
        company.featured || self.contains(&company.id)
    }

    /// Copies of `companies` with promoted ids marked featured.
    pub fn apply(&self, companies: &[Company]) -> Vec<Company> {
        companies
            .iter()
            .map(|c| {
                let mut c = c.clone();
                c.featured = self.is_featured(&c);
                c
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FeaturedOverlay {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
