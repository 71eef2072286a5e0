//! Filtering, searching and facet extraction over a company collection.
//!
//! Everything here is pure: the input slice is never modified and results
//! preserve input order.

use std::collections::BTreeSet;

use url::form_urlencoded;

use crate::company::{Company, EnergyType};

/// Which fields a search term is matched against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Name, description and tags.
    #[default]
    Basic,
    /// [`Basic`](Self::Basic) plus energy types, country and region.
    Extended,
}

/// The active filter and search state.
///
/// Every axis is independent; an empty list, an empty search term or
/// `featured == false` means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub energy_types: Vec<EnergyType>,
    pub countries: Vec<String>,
    pub regions: Vec<String>,
    pub search_term: String,
    pub featured: bool,
    pub search_scope: SearchScope,
}

impl FilterSpec {
    /// Returns `true` if no axis is constrained.
    pub fn is_empty(&self) -> bool {
        self.energy_types.is_empty()
            && self.countries.is_empty()
            && self.regions.is_empty()
            && self.search_term.is_empty()
            && !self.featured
    }

    /// Returns `true` if `company` satisfies every active axis.
    pub fn matches(&self, company: &Company) -> bool {
        if !self.energy_types.is_empty()
            && !company
                .energy_types
                .iter()
                .any(|t| self.energy_types.contains(t))
        {
            return false;
        }

        if !self.countries.is_empty() && !self.countries.contains(&company.country) {
            return false;
        }

        // A company without a region is never excluded by the region axis.
        if let Some(region) = &company.region {
            if !self.regions.is_empty() && !self.regions.contains(region) {
                return false;
            }
        }

        if self.featured && !company.featured {
            return false;
        }

        if !self.search_term.is_empty() && !self.search_matches(company) {
            return false;
        }

        true
    }

    fn search_matches(&self, company: &Company) -> bool {
        let needle = self.search_term.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&needle);

        let basic = hit(&company.name)
            || hit(&company.description)
            || company.tags.iter().flatten().any(|tag| hit(tag));

        match self.search_scope {
            SearchScope::Basic => basic,
            SearchScope::Extended => {
                basic
                    || company.energy_types.iter().any(|t| hit(t.as_str()))
                    || hit(&company.country)
                    || company.region.as_deref().is_some_and(hit)
            }
        }
    }

    /// Parse the filter state from a URL query string.
    ///
    /// Recognized parameters: `type` (repeatable, unknown types ignored),
    /// `country` and `region` (repeatable), `search`, and `featured=true`.
    /// A leading `?` is ignored.
    ///
    /// ```
    /// use energy_directory::{EnergyType, FilterSpec};
    ///
    /// let spec = FilterSpec::from_query("?type=wind&country=Denmark&search=off%20shore");
    /// assert_eq!(spec.energy_types, vec![EnergyType::Wind]);
    /// assert_eq!(spec.countries, vec!["Denmark".to_string()]);
    /// assert_eq!(spec.search_term, "off shore");
    /// ```
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut spec = FilterSpec::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "type" => {
                    if let Some(t) = EnergyType::parse(&value) {
                        if !spec.energy_types.contains(&t) {
                            spec.energy_types.push(t);
                        }
                    }
                }
                "country" if !value.is_empty() => spec.countries.push(value.into_owned()),
                "region" if !value.is_empty() => spec.regions.push(value.into_owned()),
                "search" => spec.search_term = value.into_owned(),
                "featured" => spec.featured = value == "true",
                _ => {}
            }
        }

        spec
    }

    /// Serialize the filter state as a URL query string (without `?`).
    ///
    /// Returns an empty string for an empty spec. The search scope is not
    /// part of the query.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for t in &self.energy_types {
            query.append_pair("type", t.as_str());
        }
        for country in &self.countries {
            query.append_pair("country", country);
        }
        for region in &self.regions {
            query.append_pair("region", region);
        }
        if !self.search_term.is_empty() {
            query.append_pair("search", &self.search_term);
        }
        if self.featured {
            query.append_pair("featured", "true");
        }
        query.finish()
    }
}

/// Return the companies matching `spec`, in input order.
///
/// ```
/// use energy_directory::{fallback, filter_companies, EnergyType, FilterSpec};
///
/// let companies = fallback::sample_companies();
/// let spec = FilterSpec {
///     energy_types: vec![EnergyType::Wind],
///     ..Default::default()
/// };
/// let wind = filter_companies(&companies, &spec);
/// assert!(wind.iter().all(|c| c.has_energy_type(EnergyType::Wind)));
/// ```
pub fn filter_companies(companies: &[Company], spec: &FilterSpec) -> Vec<Company> {
    if spec.is_empty() {
        return companies.to_vec();
    }
    companies
        .iter()
        .filter(|c| spec.matches(c))
        .cloned()
        .collect()
}

/// Distinct values present in a collection, for building filter controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterValues {
    pub countries: Vec<String>,
    pub regions: Vec<String>,
    pub energy_types: Vec<EnergyType>,
}

/// Collect sorted, deduplicated, non-empty facet values.
///
/// Energy types are sorted by name. Recomputed on every call, so the result
/// always reflects the collection passed in.
pub fn unique_filter_values(companies: &[Company]) -> FilterValues {
    let countries: BTreeSet<&str> = companies
        .iter()
        .map(|c| c.country.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    let regions: BTreeSet<&str> = companies
        .iter()
        .filter_map(|c| c.region.as_deref())
        .filter(|r| !r.is_empty())
        .collect();

    let mut energy_types: Vec<EnergyType> = Vec::new();
    for company in companies {
        for &t in &company.energy_types {
            if !energy_types.contains(&t) {
                energy_types.push(t);
            }
        }
    }
    energy_types.sort_by_key(|t| t.as_str());

    FilterValues {
        countries: countries.into_iter().map(str::to_string).collect(),
        regions: regions.into_iter().map(str::to_string).collect(),
        energy_types,
    }
}
