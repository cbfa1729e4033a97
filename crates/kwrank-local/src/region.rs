//! Free-text location -> provider region label.
//!
//! The keyword-discovery endpoint accepts state-level targets
//! ("Colorado,United States"); the ranked-keywords endpoint only accepts
//! countries. Both callers share one country table so the two variants
//! cannot drift apart.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPrecision {
    /// Country-level only (ranked-keywords lookup).
    Country,
    /// Country, refined to "{State},United States" for US locations
    /// (keyword discovery).
    State,
}

const DEFAULT_REGION: &str = "United States";

// Non-US country and major-city names, matched case-insensitively.
// Entries of one or two characters ("uk") match whole tokens only, so
// "Milwaukee" does not resolve to the United Kingdom.
const COUNTRY_KEYWORDS: &[(&str, &str)] = &[
    ("australia", "Australia"),
    ("sydney", "Australia"),
    ("melbourne", "Australia"),
    ("brisbane", "Australia"),
    ("perth", "Australia"),
    ("adelaide", "Australia"),
    ("uk", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("london", "United Kingdom"),
    ("england", "United Kingdom"),
    ("canada", "Canada"),
    ("toronto", "Canada"),
    ("vancouver", "Canada"),
    ("new zealand", "New Zealand"),
    ("auckland", "New Zealand"),
];

const US_STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

pub fn resolve_region(location: &str, precision: RegionPrecision) -> String {
    let lower = location.to_lowercase();

    for (needle, country) in COUNTRY_KEYWORDS {
        let hit = if needle.len() <= 2 {
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == *needle)
        } else {
            lower.contains(needle)
        };
        if hit {
            return (*country).to_string();
        }
    }

    if precision == RegionPrecision::State {
        if let Some(state) = us_state_from(location) {
            return format!("{state},United States");
        }
    }

    DEFAULT_REGION.to_string()
}

/// Match the token right after the last comma against the state table,
/// so both "Castle Rock, CO" and "Denver, CO 80202" resolve.
fn us_state_from(location: &str) -> Option<&'static str> {
    let tail = location.rsplit(',').next()?;
    let token = tail.split_whitespace().next()?;
    if token.len() != 2 || !token.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    US_STATES
        .iter()
        .find(|(abbrev, _)| *abbrev == token)
        .map(|(_, name)| *name)
}
