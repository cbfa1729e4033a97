//! End-to-end keyword ranking for one report request.
//!
//! The two provider fetches are independent and run concurrently. Discovery
//! failure is fatal; a failed ranked-keyword lookup degrades to "no ranking
//! data" so the report can still be produced with every keyword marked
//! absent. All state is local to one invocation.

use kwrank_core::{
    BusinessProfile, Error, KeywordDiscovery, KeywordOpportunity, RankedKeyword,
    RankedKeywordSource, Result,
};

use crate::crossref::cross_reference;
use crate::dataforseo::{normalize_domain, DataForSeoClient};
use crate::filter::filter_candidates;
use crate::intent::dedupe_candidates;
use crate::rank::select_top;
use crate::region::{resolve_region, RegionPrecision};
use crate::seed::generate_seeds;

pub async fn rank_keywords(
    profile: &BusinessProfile,
    site_url: &str,
    discovery: &dyn KeywordDiscovery,
    ranked_source: &dyn RankedKeywordSource,
) -> Result<Vec<KeywordOpportunity>> {
    let seeds = generate_seeds(profile);
    if seeds.is_empty() {
        return Err(Error::NoKeywords(format!(
            "no seed queries could be built for industry {:?}",
            profile.industry
        )));
    }

    let discovery_region = resolve_region(&profile.location, RegionPrecision::State);
    // The ranked-keywords endpoint does not accept state-level targets.
    let ranking_region = resolve_region(&profile.location, RegionPrecision::Country);
    let domain = normalize_domain(site_url);
    tracing::debug!(
        discovery = discovery.name(),
        ranked = ranked_source.name(),
        seeds = seeds.len(),
        %discovery_region,
        %ranking_region,
        %domain,
        "starting keyword ranking"
    );

    let (candidates, ranked) = tokio::join!(
        discovery.discover(&seeds, &discovery_region),
        ranked_source.ranked_for_domain(&domain, &ranking_region),
    );
    let candidates = candidates?;
    let ranked: Vec<RankedKeyword> = match ranked {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::warn!(error = %e, "ranked keyword lookup failed; marking all keywords absent");
            Vec::new()
        }
    };

    let filtered = filter_candidates(candidates, profile);
    if filtered.is_empty() {
        return Err(Error::NoKeywords(format!(
            "no relevant candidates for industry {:?} in {:?}",
            profile.industry, profile.location
        )));
    }
    tracing::debug!(filtered = filtered.len(), ranked = ranked.len(), "filtering complete");

    let cities = if profile.is_local {
        profile.known_cities()
    } else {
        Vec::new()
    };
    let deduped = dedupe_candidates(filtered, &cities);
    let top = select_top(&deduped, profile);
    Ok(cross_reference(&top, &ranked, &cities))
}

/// Build a DataForSEO-backed pipeline from the environment. Credential
/// problems surface before any network call.
pub async fn rank_keywords_from_env(
    profile: &BusinessProfile,
    site_url: &str,
) -> Result<Vec<KeywordOpportunity>> {
    let provider = DataForSeoClient::from_env(reqwest::Client::new())?;
    rank_keywords(profile, site_url, &provider, &provider).await
}
