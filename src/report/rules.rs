//! The report category table and per-category renderers.

use crate::{
    error::{ExoplanetError, Result},
    record::Record,
};

use super::{KeyKind, NO_DATA, SortKey, extract_key, format::format_grouped, parse_number};

pub const PARSEC_M: f64 = 3.085677581e16;
pub const AU_PER_PARSEC: f64 = 206_265.0;
pub const LIGHTYEARS_PER_PARSEC: f64 = 3.26156;
pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const EARTH_YEAR_DAYS: f64 = 365.25;
pub const EARTH_MASS_KG: f64 = 5.972e24;
pub const SOLAR_MASS_KG: f64 = 1.9885e30;
pub const EARTH_FLUX_W_M2: f64 = 1361.0;

/// Orbital periods above this many days are labelled as estimated.
pub const ESTIMATED_PERIOD_DAYS: f64 = 10_000.0;

/// How the known value of a report field turns into detail lines.
#[derive(Debug, Clone, Copy)]
pub enum Renderer {
    /// Echo the raw value after `label`.
    Raw(&'static str),
    /// Parse as a number and derive converted lines.
    Converted(fn(f64) -> Vec<String>),
}

#[derive(Debug, Clone, Copy)]
pub struct ReportRule {
    /// Option name used on the command line.
    pub name: &'static str,
    pub field: &'static str,
    pub kind: KeyKind,
    pub title: &'static str,
    pub file_name: &'static str,
    pub renderer: Renderer,
}

impl ReportRule {
    pub fn key(&self, record: &Record) -> Result<SortKey> {
        extract_key(record, self.field, self.kind)
    }

    /// Header line plus tab-indented details for the planet at `rank`.
    pub fn render_entry(&self, rank: usize, record: &Record) -> Result<Vec<String>> {
        let mut lines = vec![format!("{rank}) Name: {}:", record.name())];
        let details = match record.value(self.field) {
            None => vec![NO_DATA.to_string()],
            Some(raw) => match self.renderer {
                Renderer::Raw(label) => vec![format!("{label}: {}", raw.trim())],
                Renderer::Converted(convert) => convert(parse_number(self.field, record, raw)?),
            },
        };
        lines.extend(details.into_iter().map(|line| format!("\t{line}")));
        Ok(lines)
    }
}

pub static REPORT_RULES: &[ReportRule] = &[
    ReportRule {
        name: "distance",
        field: "sy_dist",
        kind: KeyKind::Numeric,
        title: "List of Exoplanets Distance From Earth",
        file_name: "exoplanets_distance.txt",
        renderer: Renderer::Converted(render_distance),
    },
    ReportRule {
        name: "discovery_year",
        field: "disc_year",
        kind: KeyKind::Numeric,
        title: "List of Exoplanets Discovery Years in Order",
        file_name: "exoplanets_discovery.txt",
        renderer: Renderer::Raw("Discovery Year"),
    },
    ReportRule {
        name: "publication_date",
        field: "disc_pubdate",
        kind: KeyKind::Date,
        title: "List of Exoplanets Publication Date in Order",
        file_name: "exoplanets_publication.txt",
        renderer: Renderer::Raw("Publication Date"),
    },
    ReportRule {
        name: "size",
        field: "pl_rade",
        kind: KeyKind::Numeric,
        title: "List of Exoplanets Size From Smaller to Biggest",
        file_name: "exoplanets_size.txt",
        renderer: Renderer::Converted(render_radius),
    },
    ReportRule {
        name: "orbital_period",
        field: "pl_orbper",
        kind: KeyKind::Numeric,
        title: "List of Exoplanets Orbital Period",
        file_name: "exoplanets_orbital_period.txt",
        renderer: Renderer::Converted(render_orbital_period),
    },
    ReportRule {
        name: "mass",
        field: "pl_masse",
        kind: KeyKind::Numeric,
        title: "List of Exoplanets Mass in Order",
        file_name: "exoplanets_mass.txt",
        renderer: Renderer::Converted(render_mass),
    },
    ReportRule {
        name: "star_mass",
        field: "st_mass",
        kind: KeyKind::Numeric,
        title: "List of Exoplanets Star's Mass in Order",
        file_name: "exoplanets_star_mass.txt",
        renderer: Renderer::Converted(render_stellar_mass),
    },
    ReportRule {
        name: "insolation",
        field: "pl_insol",
        kind: KeyKind::Numeric,
        title: "List of Exoplanets Incident Stellar Flux in Order",
        file_name: "exoplanets_insolation.txt",
        renderer: Renderer::Converted(render_insolation),
    },
];

pub fn find_rule<'a>(rules: &'a [ReportRule], name: &str) -> Result<&'a ReportRule> {
    let wanted = name.trim();
    rules
        .iter()
        .find(|rule| rule.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ExoplanetError::UnknownCategory(name.to_string()))
}

fn render_distance(parsecs: f64) -> Vec<String> {
    let km = parsecs * PARSEC_M / 1000.0;
    let au = parsecs * AU_PER_PARSEC;
    let light_years = parsecs * LIGHTYEARS_PER_PARSEC;
    vec![
        format!("KM: {}", format_grouped(km, 0)),
        format!("AU: {}", format_grouped(au, 0)),
        format!("Light Years: {}", format_grouped(light_years, 2)),
        format!("Parsecs: {}", format_grouped(parsecs, 2)),
    ]
}

fn render_radius(earth_radii: f64) -> Vec<String> {
    vec![
        format!("Radius (R⊕): {}", format_grouped(earth_radii, 2)),
        format!("Radius (km): {}", format_grouped(earth_radii * EARTH_RADIUS_KM, 0)),
    ]
}

fn render_orbital_period(days: f64) -> Vec<String> {
    let years = days / EARTH_YEAR_DAYS;
    let marker = if days > ESTIMATED_PERIOD_DAYS {
        "(estimated) "
    } else {
        ""
    };
    vec![
        format!("Orbital Period (days): {marker}{}", format_grouped(days, 2)),
        format!("Earth Years: {marker}{}", format_grouped(years, 4)),
    ]
}

fn render_mass(earth_masses: f64) -> Vec<String> {
    vec![
        format!("Mass (M⊕): {}", format_grouped(earth_masses, 2)),
        format!("Mass (kg): {}", format_grouped(earth_masses * EARTH_MASS_KG, 0)),
    ]
}

fn render_stellar_mass(solar_masses: f64) -> Vec<String> {
    let kg = solar_masses * SOLAR_MASS_KG;
    vec![
        format!("Stellar Mass (M☉): {}", format_grouped(solar_masses, 3)),
        format!("Mass (kg): {}", format_grouped(kg, 0)),
        format!("Planet Mass (M⊕): {}", format_grouped(kg / EARTH_MASS_KG, 0)),
    ]
}

fn render_insolation(flux: f64) -> Vec<String> {
    vec![
        format!("Insolation (S⊕): {}", format_grouped(flux, 4)),
        format!(
            "Incident Stellar Flux (W/m²): {}",
            format_grouped(flux * EARTH_FLUX_W_M2, 2)
        ),
    ]
}
