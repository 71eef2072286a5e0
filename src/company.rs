//! The [`Company`] record and its [`EnergyType`] categorization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Renewable-energy category a company works in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    Solar,
    Wind,
    Hydro,
    Geothermal,
    Biomass,
    Other,
}

impl EnergyType {
    /// Every category, in declaration order.
    pub const ALL: [EnergyType; 6] = [
        EnergyType::Solar,
        EnergyType::Wind,
        EnergyType::Hydro,
        EnergyType::Geothermal,
        EnergyType::Biomass,
        EnergyType::Other,
    ];

    /// Lowercase name as it appears in source data and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyType::Solar => "solar",
            EnergyType::Wind => "wind",
            EnergyType::Hydro => "hydro",
            EnergyType::Geothermal => "geothermal",
            EnergyType::Biomass => "biomass",
            EnergyType::Other => "other",
        }
    }

    /// Parse a single token, ignoring surrounding whitespace and case.
    ///
    /// ```
    /// use energy_directory::EnergyType;
    ///
    /// assert_eq!(EnergyType::parse(" Wind "), Some(EnergyType::Wind));
    /// assert_eq!(EnergyType::parse("nuclear"), None);
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }

    /// Parse a `,`-separated list of tokens, dropping unknown ones and
    /// duplicates. Never returns an empty list: falls back to `[Other]`.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        let mut types = Vec::new();
        for t in raw.split(',').filter_map(Self::parse) {
            if !types.contains(&t) {
                types.push(t);
            }
        }
        if types.is_empty() {
            types.push(EnergyType::Other);
        }
        types
    }
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named social profile links. Each one is independently optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialMedia {
    /// Returns `true` if no profile is set.
    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none()
            && self.twitter.is_none()
            && self.facebook.is_none()
            && self.instagram.is_none()
    }
}

/// One directory entry.
///
/// Produced by the [`RowMapper`](crate::RowMapper) or taken from the
/// [fallback dataset](crate::fallback::sample_companies). The crate never
/// mutates a company after it has been mapped; overlays such as
/// [`FeaturedOverlay`](crate::FeaturedOverlay) work on copies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// 1-based position of the source row, unique within one fetch.
    pub id: String,
    pub name: String,
    /// A sanitized `http(s)` URL or the sentinel `"#"`.
    pub website: String,
    pub description: String,
    /// Never empty.
    pub energy_types: Vec<EnergyType>,
    pub location: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Company {
    /// Returns `true` if the company works in the given category.
    pub fn has_energy_type(&self, energy_type: EnergyType) -> bool {
        self.energy_types.contains(&energy_type)
    }

    /// Returns `true` unless the website is the `"#"` sentinel.
    pub fn has_website(&self) -> bool {
        self.website != crate::sanitizer::SENTINEL
    }

    /// Canonical slug for this company's detail page.
    pub fn slug(&self) -> String {
        crate::lookup::generate_slug(&self.name)
    }
}
