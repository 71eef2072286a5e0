//! Sample companies served when the live source cannot be used.

use crate::company::{Company, EnergyType};
use crate::error::{DirectoryError, Result};
use crate::sanitizer::{SENTINEL, UrlPolicy};

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    slug: &str,
    description: &str,
    energy_type: EnergyType,
    location: &str,
    founded: i32,
    featured: bool,
    services: [&str; 3],
    tags: [&str; 3],
) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
        website: format!("https://example.com/{slug}"),
        description: description.to_string(),
        energy_types: vec![energy_type],
        location: location.to_string(),
        country: "USA".to_string(),
        region: None,
        founded: Some(founded),
        logo: None,
        featured,
        contact_email: None,
        contact_phone: None,
        social_media: None,
        services: Some(services.map(String::from).to_vec()),
        products: None,
        certifications: None,
        tags: Some(tags.map(String::from).to_vec()),
    }
}

/// The built-in fallback dataset: one company per main energy type.
pub fn sample_companies() -> Vec<Company> {
    vec![
        sample(
            "1",
            "SolarTech Industries",
            "solartech",
            "Leading provider of solar panel solutions for residential and commercial use.",
            EnergyType::Solar,
            "California",
            2010,
            true,
            ["Installation", "Maintenance", "Consulting"],
            ["solar panels", "renewable", "green energy"],
        ),
        sample(
            "2",
            "WindForce Energy",
            "windforce",
            "Specializing in wind turbine manufacturing and wind farm development.",
            EnergyType::Wind,
            "Texas",
            2008,
            true,
            ["Manufacturing", "Development", "Maintenance"],
            ["wind power", "turbines", "renewable"],
        ),
        sample(
            "3",
            "HydroFlow Systems",
            "hydroflow",
            "Innovative hydroelectric power solutions for various scales.",
            EnergyType::Hydro,
            "Oregon",
            2012,
            false,
            ["Dam Construction", "Turbine Installation", "Maintenance"],
            ["hydroelectric", "water power", "renewable"],
        ),
        sample(
            "4",
            "GeoThermal Innovations",
            "geothermal",
            "Harnessing the Earth's heat for sustainable energy production.",
            EnergyType::Geothermal,
            "Nevada",
            2015,
            false,
            ["Site Assessment", "System Design", "Installation"],
            ["geothermal", "earth energy", "sustainable"],
        ),
        sample(
            "5",
            "BioEnergy Solutions",
            "bioenergy",
            "Converting organic materials into clean, renewable energy.",
            EnergyType::Biomass,
            "Iowa",
            2013,
            false,
            ["Biomass Processing", "Energy Conversion", "Consulting"],
            ["biomass", "organic", "biofuel"],
        ),
    ]
}

/// Check that a dataset can stand in for live data: non-empty, unique ids,
/// every company with at least one energy type and a website that is
/// either [`SENTINEL`] or already accepted by `policy`.
pub fn validate_dataset(companies: &[Company], policy: &UrlPolicy) -> Result<()> {
    if companies.is_empty() {
        return Err(DirectoryError::Config("fallback dataset is empty".into()));
    }

    for (i, company) in companies.iter().enumerate() {
        if companies[..i].iter().any(|c| c.id == company.id) {
            return Err(DirectoryError::Config(format!(
                "fallback dataset has duplicate id {:?}",
                company.id
            )));
        }
        if company.energy_types.is_empty() {
            return Err(DirectoryError::Config(format!(
                "fallback company {:?} has no energy types",
                company.name
            )));
        }
        if company.website != SENTINEL && policy.sanitize(&company.website) != company.website {
            return Err(DirectoryError::Config(format!(
                "fallback company {:?} has an unsafe website",
                company.name
            )));
        }
    }

    Ok(())
}
