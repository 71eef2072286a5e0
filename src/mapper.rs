//! Maps raw source rows to [`Company`] records.

use crate::company::{Company, EnergyType, SocialMedia};
use crate::sanitizer::{SENTINEL, UrlPolicy, UrlVerdict};
use crate::schema::{Field, ResolvedSchema, SchemaMap};

const DEFAULT_DESCRIPTION: &str = "No description provided";
const UNKNOWN: &str = "Unknown";

/// Result of mapping one row.
#[derive(Clone, Debug, PartialEq)]
pub enum RowOutcome {
    /// The row produced a company. `rejected_urls` counts non-empty URL
    /// cells that the policy blocked.
    Mapped {
        company: Company,
        rejected_urls: usize,
    },
    /// The row had fewer fields than the schema requires.
    Insufficient { found: usize, required: usize },
}

impl RowOutcome {
    /// The mapped company, or `None` for a skipped row.
    pub fn into_company(self) -> Option<Company> {
        match self {
            RowOutcome::Mapped { company, .. } => Some(company),
            RowOutcome::Insufficient { .. } => None,
        }
    }
}

/// Applies a resolved [`SchemaMap`] and a [`UrlPolicy`] to source rows.
///
/// # Example
///
/// ```
/// use energy_directory::{RowMapper, SchemaMap, UrlPolicy};
///
/// let schema = SchemaMap::new().name(0).website(1).energy_types(2).min_columns(3);
/// let policy = UrlPolicy::default();
/// let mapper = RowMapper::new(&schema, &[], &policy);
///
/// let row: Vec<String> = ["Acme", "acme.example", "solar, wind"].map(String::from).to_vec();
/// let company = mapper.map_row(&row, 0).into_company().unwrap();
/// assert_eq!(company.id, "1");
/// assert_eq!(company.website, "https://acme.example");
/// ```
pub struct RowMapper<'a> {
    schema: ResolvedSchema,
    policy: &'a UrlPolicy,
}

impl<'a> RowMapper<'a> {
    /// Resolve `schema` against `header` (may be empty when the schema
    /// only uses column positions).
    pub fn new(schema: &SchemaMap, header: &[String], policy: &'a UrlPolicy) -> Self {
        Self {
            schema: schema.resolve(header),
            policy,
        }
    }

    /// Map the data row at zero-based `row_index` (header rows excluded).
    ///
    /// The company id is `row_index + 1`.
    pub fn map_row(&self, fields: &[String], row_index: usize) -> RowOutcome {
        let required = self.schema.min_columns;
        if fields.len() < required {
            tracing::warn!(
                line = row_index + self.schema.header_rows + 1,
                found = fields.len(),
                required,
                "Row has insufficient data, skipping"
            );
            return RowOutcome::Insufficient {
                found: fields.len(),
                required,
            };
        }

        let n = row_index + 1;
        let cell = |field: Field| self.schema.cell(field, fields);
        let text = |field: Field| cell(field).map(str::to_string);
        let mut rejected_urls = 0;

        let mut website = SENTINEL.to_string();
        for candidate in self.schema.website_cells(fields) {
            match self.policy.validate(candidate) {
                UrlVerdict::Safe(url) => {
                    website = url;
                    break;
                }
                UrlVerdict::Rejected(_) => rejected_urls += 1,
                UrlVerdict::Empty => {}
            }
        }

        let mut profile = |field: Field| match cell(field).map(|raw| self.policy.validate(raw)) {
            Some(UrlVerdict::Safe(url)) => Some(url),
            Some(UrlVerdict::Rejected(_)) => {
                rejected_urls += 1;
                None
            }
            _ => None,
        };
        let social = SocialMedia {
            linkedin: profile(Field::Linkedin),
            twitter: profile(Field::Twitter),
            facebook: profile(Field::Facebook),
            instagram: profile(Field::Instagram),
        };

        let list = |field: Field| {
            cell(field)
                .map(|raw| split_list(raw, self.schema.list_delimiter))
                .filter(|items| !items.is_empty())
        };

        let company = Company {
            id: n.to_string(),
            name: text(Field::Name).unwrap_or_else(|| format!("Company {n}")),
            website,
            description: text(Field::Description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            energy_types: EnergyType::parse_list(cell(Field::EnergyTypes).unwrap_or_default()),
            location: text(Field::Location).unwrap_or_else(|| UNKNOWN.to_string()),
            country: text(Field::Country).unwrap_or_else(|| UNKNOWN.to_string()),
            region: text(Field::Region),
            founded: cell(Field::Founded).and_then(|v| v.parse().ok()),
            logo: text(Field::Logo),
            featured: cell(Field::Featured)
                .is_some_and(|v| self.schema.featured_encoding.decode(v)),
            contact_email: text(Field::ContactEmail),
            contact_phone: text(Field::ContactPhone),
            social_media: (!social.is_empty()).then_some(social),
            services: list(Field::Services),
            products: list(Field::Products),
            certifications: list(Field::Certifications),
            tags: list(Field::Tags),
        };

        if rejected_urls > 0 {
            tracing::warn!(
                company = %company.name,
                rejected_urls,
                "Blocked potentially unsafe URL"
            );
        }

        RowOutcome::Mapped {
            company,
            rejected_urls,
        }
    }
}

fn split_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
