//! Seed query generation.
//!
//! The discovery provider accepts at most 20 seed queries per batched
//! request, so the output is capped there. When the upstream classifier has
//! already paired service terms with area cities, its seeds are used
//! verbatim; otherwise seeds are built from the industry, the known cities,
//! and the profile's service list.

use kwrank_core::BusinessProfile;

/// Batch size the discovery provider accepts per request.
pub const MAX_SEEDS: usize = 20;

// Stock seed terms per industry key (lowercased, spaces -> underscores).
// Just the service, no location; a city gets appended to every one.
const INDUSTRY_SEEDS: &[(&str, &[&str])] = &[
    (
        "plumbing",
        &[
            "plumber",
            "plumbing services",
            "drain cleaning",
            "water heater repair",
            "leak repair",
            "emergency plumber",
            "pipe repair",
            "sewer repair",
            "toilet repair",
        ],
    ),
    (
        "hvac",
        &[
            "hvac repair",
            "air conditioning repair",
            "ac repair",
            "furnace repair",
            "heating repair",
            "ac installation",
            "hvac company",
            "heat pump installation",
            "duct cleaning",
        ],
    ),
    (
        "roofing",
        &[
            "roofing contractor",
            "roof repair",
            "roofer",
            "roof replacement",
            "roof inspection",
            "roof leak repair",
            "shingle repair",
            "metal roofing",
            "emergency roof repair",
        ],
    ),
    (
        "electrical",
        &[
            "electrician",
            "electrical contractor",
            "electrical repair",
            "outlet installation",
            "lighting installation",
            "panel upgrade",
            "emergency electrician",
            "wiring repair",
        ],
    ),
    (
        "painting",
        &[
            "painter",
            "house painter",
            "painting contractor",
            "interior painting",
            "exterior painting",
            "house painting",
            "residential painter",
            "commercial painter",
            "cabinet painting",
            "deck staining",
        ],
    ),
    (
        "landscaping",
        &[
            "landscaping company",
            "landscaper",
            "lawn care service",
            "tree trimming",
            "tree removal",
            "landscape design",
            "lawn mowing service",
            "irrigation installation",
        ],
    ),
    (
        "cleaning",
        &[
            "house cleaning service",
            "cleaning service",
            "maid service",
            "deep cleaning",
            "office cleaning",
            "commercial cleaning",
            "carpet cleaning",
            "move out cleaning",
        ],
    ),
    (
        "pest_control",
        &[
            "pest control",
            "exterminator",
            "termite treatment",
            "bed bug treatment",
            "rodent control",
            "ant exterminator",
            "mosquito control",
            "wildlife removal",
        ],
    ),
];

/// Stock seed terms for an industry; empty for industries not in the table.
pub(crate) fn stock_seeds(industry: &str) -> &'static [&'static str] {
    let key = industry.trim().to_lowercase().replace(' ', "_");
    INDUSTRY_SEEDS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, seeds)| *seeds)
        .unwrap_or(&[])
}

pub fn generate_seeds(profile: &BusinessProfile) -> Vec<String> {
    if !profile.seed_keywords.is_empty() {
        return dedup_seeds(profile.seed_keywords.iter().cloned());
    }

    let industry = profile.industry.trim().to_lowercase();
    if industry.is_empty() {
        return Vec::new();
    }

    let mut seeds: Vec<String> = Vec::new();
    if profile.is_local {
        for city in profile.known_cities() {
            seeds.push(format!("{industry} {city}"));
            seeds.push(format!("{industry} services {city}"));
            seeds.push(format!("{industry} contractor {city}"));
            seeds.push(format!("{industry} company {city}"));
            seeds.push(format!("best {industry} {city}"));
        }
        if let Some(city) = profile.primary_city() {
            for term in stock_seeds(&industry) {
                seeds.push(format!("{term} {city}"));
            }
            for service in profile.services.iter().take(5) {
                seeds.push(format!("{service} {city}"));
            }
        }
    } else {
        // No city anchor: bare terms plus purchase-intent modifiers.
        seeds.push(industry.clone());
        seeds.push(format!("best {industry}"));
        seeds.push(format!("buy {industry}"));
        seeds.push(format!("{industry} online"));
        for service in profile.services.iter().take(5) {
            seeds.push(service.clone());
            seeds.push(format!("best {service}"));
        }
    }

    dedup_seeds(seeds)
}

/// Case-insensitive dedup preserving first-seen order, capped at `MAX_SEEDS`.
fn dedup_seeds(seeds: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::new();
    for seed in seeds {
        let seed = seed.trim().to_string();
        if seed.is_empty() {
            continue;
        }
        if seen.insert(seed.to_lowercase()) {
            out.push(seed);
            if out.len() == MAX_SEEDS {
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_profile() -> BusinessProfile {
        BusinessProfile {
            industry: "Painting".to_string(),
            is_local: true,
            location: "Castle Rock, CO".to_string(),
            service_area_cities: vec!["Parker".to_string()],
            services: vec!["cabinet refinishing".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn classifier_seeds_are_used_verbatim() {
        let profile = BusinessProfile {
            seed_keywords: vec![
                "house painter castle rock".to_string(),
                "House Painter Castle Rock".to_string(),
                "deck staining parker".to_string(),
            ],
            ..local_profile()
        };
        let seeds = generate_seeds(&profile);
        assert_eq!(
            seeds,
            vec!["house painter castle rock", "deck staining parker"]
        );
    }

    #[test]
    fn local_fallback_pairs_every_seed_with_a_city() {
        let seeds = generate_seeds(&local_profile());
        assert!(!seeds.is_empty());
        assert!(seeds.len() <= MAX_SEEDS);
        for seed in &seeds {
            let lower = seed.to_lowercase();
            assert!(
                lower.contains("castle rock") || lower.contains("parker"),
                "seed without a city: {seed:?}"
            );
        }
        assert!(seeds.contains(&"painting Castle Rock".to_string()));
        assert!(seeds.contains(&"painting contractor Castle Rock".to_string()));
    }

    #[test]
    fn non_local_fallback_uses_purchase_intent_modifiers() {
        let profile = BusinessProfile {
            industry: "standing desks".to_string(),
            is_local: false,
            services: vec!["ergonomic chairs".to_string()],
            ..Default::default()
        };
        let seeds = generate_seeds(&profile);
        assert!(seeds.contains(&"standing desks".to_string()));
        assert!(seeds.contains(&"best standing desks".to_string()));
        assert!(seeds.contains(&"buy standing desks".to_string()));
        assert!(seeds.contains(&"ergonomic chairs".to_string()));
        for seed in &seeds {
            assert!(!seed.to_lowercase().contains("castle rock"));
        }
    }

    #[test]
    fn seeds_are_capped_at_the_provider_batch_size() {
        let profile = BusinessProfile {
            service_area_cities: (0..30).map(|i| format!("City{i}")).collect(),
            ..local_profile()
        };
        let seeds = generate_seeds(&profile);
        assert_eq!(seeds.len(), MAX_SEEDS);
    }

    #[test]
    fn unknown_industry_gets_no_stock_seeds() {
        assert!(stock_seeds("taxidermy").is_empty());
        assert!(!stock_seeds("Pest Control").is_empty());
    }

    #[test]
    fn empty_industry_and_no_classifier_seeds_yields_nothing() {
        let profile = BusinessProfile {
            is_local: false,
            ..Default::default()
        };
        assert!(generate_seeds(&profile).is_empty());
    }
}
