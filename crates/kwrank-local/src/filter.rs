//! Candidate filtering: brand/aggregator blocklist, profile relevance, and
//! the local-opportunity city requirement.

use kwrank_core::{BusinessProfile, KeywordCandidate};

use crate::seed::stock_seeds;

// Marketplace/aggregator names that never make useful opportunity keywords,
// regardless of industry. Profile blocklists carry the industry brands.
const AGGREGATOR_BLOCKLIST: &[&str] = &[
    "angi",
    "angie's list",
    "thumbtack",
    "yelp",
    "houzz",
    "nextdoor",
    "home depot",
    "lowes",
    "lowe's",
    "craigslist",
    "amazon",
    "walmart",
    "facebook",
    "groupon",
];

// Generic service-intent vocabulary for the derived relevance fallback.
const SERVICE_INTENT_TERMS: &[&str] = &[
    "service",
    "services",
    "contractor",
    "company",
    "repair",
    "install",
    "installation",
    "removal",
    "maintenance",
    "cost",
    "price",
    "quote",
    "estimate",
    "emergency",
    "residential",
    "commercial",
    "licensed",
    "professional",
    "near me",
    "in my area",
];

pub fn filter_candidates(
    candidates: Vec<KeywordCandidate>,
    profile: &BusinessProfile,
) -> Vec<KeywordCandidate> {
    let blocklist: Vec<String> = profile
        .brand_blocklist
        .iter()
        .map(|b| b.trim().to_lowercase())
        .chain(AGGREGATOR_BLOCKLIST.iter().map(|b| b.to_string()))
        .filter(|b| !b.is_empty())
        .collect();
    let relevance = relevance_terms(profile);
    let cities: Vec<String> = profile
        .known_cities()
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::new();
    for cand in candidates {
        if cand.monthly_volume == 0 {
            continue;
        }
        let lower = cand.keyword.to_lowercase();
        if lower.trim().is_empty() {
            continue;
        }
        // The provider may return the same string in different casings.
        if !seen.insert(lower.clone()) {
            continue;
        }
        if blocklist.iter().any(|b| lower.contains(b.as_str())) {
            continue;
        }
        if !relevance.iter().any(|t| lower.contains(t.as_str())) {
            continue;
        }
        // A keyword with no located city is not a local opportunity.
        if profile.is_local && !cities.iter().any(|c| lower.contains(c.as_str())) {
            continue;
        }
        // Downstream comparisons and the final report both work on the
        // lowercase form.
        out.push(KeywordCandidate {
            keyword: lower,
            monthly_volume: cand.monthly_volume,
        });
    }
    out
}

/// Profile relevance terms, or the derived fallback set when the profile
/// supplies none: service words, industry words, stock-seed words, and the
/// generic service-intent vocabulary.
fn relevance_terms(profile: &BusinessProfile) -> Vec<String> {
    let supplied: Vec<String> = profile
        .relevance_terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if !supplied.is_empty() {
        return supplied;
    }

    let mut terms: std::collections::BTreeSet<String> = SERVICE_INTENT_TERMS
        .iter()
        .map(|t| t.to_string())
        .collect();
    for service in &profile.services {
        for word in service.to_lowercase().split_whitespace() {
            if word.len() > 2 {
                terms.insert(word.to_string());
            }
        }
    }
    for word in profile.industry.to_lowercase().split_whitespace() {
        if word.len() > 2 {
            terms.insert(word.to_string());
        }
    }
    for seed in stock_seeds(&profile.industry) {
        for word in seed.split_whitespace() {
            if word.len() > 2 && !matches!(word, "the" | "and" | "for" | "near") {
                terms.insert(word.to_string());
            }
        }
    }
    terms.into_iter().collect()
}
