use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("keyword discovery failed: {0}")]
    Discovery(String),
    #[error("no usable keyword data: {0}")]
    NoKeywords(String),
    #[error("ranked keyword lookup failed: {0}")]
    Ranking(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One (keyword, volume) pair from the discovery provider, pre-filtering.
///
/// Rows with zero volume carry no ranking value and are dropped at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCandidate {
    pub keyword: String,
    pub monthly_volume: u64,
}

/// SERP slot a ranked keyword was observed in. Providers grow new slot types
/// over time; unknown values fold into `Other` rather than failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Organic,
    Paid,
    FeaturedSnippet,
    LocalPack,
    #[serde(other)]
    Other,
}

/// A keyword the target domain currently ranks for in live search results.
///
/// Sourced independently of `KeywordCandidate`; the two are reconciled only
/// by normalized string comparison, never by shared identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub search_volume: u64,
    pub rank_position: u32,
    pub result_type: ResultType,
}

/// Business facts supplied by the upstream classifier. Read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business_name: String,
    /// Free text, e.g. "plumbing", "Italian restaurant".
    pub industry: String,
    /// Whether relevance is tied to a geographic service area.
    pub is_local: bool,
    /// "City, Region", or empty for non-local businesses.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub service_area_cities: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    /// Seed queries already paired by the classifier; used verbatim when present.
    #[serde(default)]
    pub seed_keywords: Vec<String>,
    /// A relevant keyword must contain at least one of these.
    #[serde(default)]
    pub relevance_terms: Vec<String>,
    /// Any keyword containing one of these is disqualified.
    #[serde(default)]
    pub brand_blocklist: Vec<String>,
}

impl BusinessProfile {
    /// City part of `location` ("Castle Rock, CO" -> "Castle Rock").
    pub fn primary_city(&self) -> Option<&str> {
        self.location
            .split(',')
            .next()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Primary city followed by service-area cities, deduplicated
    /// case-insensitively in first-seen order.
    pub fn known_cities(&self) -> Vec<String> {
        let mut seen = std::collections::BTreeSet::new();
        let mut out = Vec::new();
        let primary = self.primary_city().map(str::to_string);
        for city in primary.iter().chain(self.service_area_cities.iter()) {
            let city = city.trim();
            if city.is_empty() {
                continue;
            }
            if seen.insert(city.to_lowercase()) {
                out.push(city.to_string());
            }
        }
        out
    }
}

/// Externally visible output row, one per surviving candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordOpportunity {
    pub keyword: String,
    pub monthly_volume: u64,
    pub on_existing_site: bool,
}

#[async_trait::async_trait]
pub trait KeywordDiscovery: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch candidate keywords for a batch of seed queries (<= 20) in the
    /// given target region. Any failure is fatal to the pipeline.
    async fn discover(&self, seeds: &[String], region: &str) -> Result<Vec<KeywordCandidate>>;
}

#[async_trait::async_trait]
pub trait RankedKeywordSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch the keywords a bare domain (no scheme/`www.`) currently ranks
    /// for. `region` must be country-level. Callers may treat failure as
    /// "no ranking data".
    async fn ranked_for_domain(&self, domain: &str, region: &str) -> Result<Vec<RankedKeyword>>;
}
