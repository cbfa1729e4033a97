//! DataForSEO provider adapter.
//!
//! One client implements both service traits: keyword discovery via the
//! Google Ads "keywords for keywords" live endpoint, and the domain's
//! current rankings via the Labs "ranked keywords" live endpoint. Requests
//! authenticate with HTTP basic auth.

use serde::Deserialize;
use std::time::Duration;

use kwrank_core::{
    Error, KeywordCandidate, KeywordDiscovery, RankedKeyword, RankedKeywordSource, Result,
    ResultType,
};

use crate::seed::MAX_SEEDS;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const RESULT_LIMIT: u32 = 100;

fn login_from_env() -> Option<String> {
    std::env::var("KWRANK_DATAFORSEO_LOGIN")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            std::env::var("DATAFORSEO_LOGIN")
                .ok()
                .filter(|v| !v.trim().is_empty())
        })
}

fn password_from_env() -> Option<String> {
    std::env::var("KWRANK_DATAFORSEO_PASSWORD")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            std::env::var("DATAFORSEO_PASSWORD")
                .ok()
                .filter(|v| !v.trim().is_empty())
        })
}

fn keywords_endpoint_from_env() -> Option<String> {
    std::env::var("KWRANK_DATAFORSEO_KEYWORDS_ENDPOINT")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn ranked_endpoint_from_env() -> Option<String> {
    std::env::var("KWRANK_DATAFORSEO_RANKED_ENDPOINT")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone)]
pub struct DataForSeoClient {
    client: reqwest::Client,
    login: String,
    password: String,
}

impl DataForSeoClient {
    pub fn from_env(client: reqwest::Client) -> Result<Self> {
        let login = login_from_env().ok_or_else(|| {
            Error::NotConfigured("missing KWRANK_DATAFORSEO_LOGIN (or DATAFORSEO_LOGIN)".to_string())
        })?;
        let password = password_from_env().ok_or_else(|| {
            Error::NotConfigured(
                "missing KWRANK_DATAFORSEO_PASSWORD (or DATAFORSEO_PASSWORD)".to_string(),
            )
        })?;
        Ok(Self {
            client,
            login,
            password,
        })
    }

    fn keywords_endpoint() -> String {
        keywords_endpoint_from_env().unwrap_or_else(|| {
            "https://api.dataforseo.com/v3/keywords_data/google_ads/keywords_for_keywords/live"
                .to_string()
        })
    }

    fn ranked_endpoint() -> String {
        ranked_endpoint_from_env().unwrap_or_else(|| {
            "https://api.dataforseo.com/v3/dataforseo_labs/google/ranked_keywords/live".to_string()
        })
    }
}

/// Bare host for the ranked-keywords lookup: no scheme, no leading `www.`,
/// no path/query.
pub fn normalize_domain(site_url: &str) -> String {
    let trimmed = site_url.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let host = url::Url::parse(&with_scheme)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| {
            trimmed
                .trim_start_matches("http://")
                .trim_start_matches("https://")
                .split(['/', '?', '#'])
                .next()
                .unwrap_or("")
                .to_lowercase()
        });
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

#[derive(Debug, Deserialize)]
struct KeywordsForKeywordsResponse {
    tasks: Option<Vec<KeywordsTask>>,
}

#[derive(Debug, Deserialize)]
struct KeywordsTask {
    result: Option<Vec<KeywordsRow>>,
}

#[derive(Debug, Deserialize)]
struct KeywordsRow {
    keyword: Option<String>,
    search_volume: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RankedKeywordsResponse {
    tasks: Option<Vec<RankedTask>>,
}

#[derive(Debug, Deserialize)]
struct RankedTask {
    result: Option<Vec<RankedResult>>,
}

#[derive(Debug, Deserialize)]
struct RankedResult {
    items: Option<Vec<RankedItem>>,
}

#[derive(Debug, Deserialize)]
struct RankedItem {
    keyword_data: Option<RankedKeywordData>,
    ranked_serp_element: Option<RankedSerpElement>,
}

#[derive(Debug, Deserialize)]
struct RankedKeywordData {
    keyword: Option<String>,
    keyword_info: Option<RankedKeywordInfo>,
}

#[derive(Debug, Deserialize)]
struct RankedKeywordInfo {
    search_volume: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RankedSerpElement {
    serp_item: Option<RankedSerpItem>,
}

#[derive(Debug, Deserialize)]
struct RankedSerpItem {
    rank_absolute: Option<u32>,
    #[serde(rename = "type")]
    item_type: Option<ResultType>,
}

fn candidates_from(parsed: KeywordsForKeywordsResponse) -> Vec<KeywordCandidate> {
    let mut out = Vec::new();
    for task in parsed.tasks.unwrap_or_default() {
        for row in task.result.unwrap_or_default() {
            let Some(keyword) = row.keyword else { continue };
            if keyword.trim().is_empty() {
                continue;
            }
            // Zero or missing volume means no measurable demand.
            let Some(volume) = row.search_volume else { continue };
            if volume <= 0 {
                continue;
            }
            out.push(KeywordCandidate {
                keyword,
                monthly_volume: volume as u64,
            });
        }
    }
    out
}

fn ranked_from(parsed: RankedKeywordsResponse) -> Vec<RankedKeyword> {
    let mut out = Vec::new();
    for task in parsed.tasks.unwrap_or_default() {
        for result in task.result.unwrap_or_default() {
            for item in result.items.unwrap_or_default() {
                let Some(data) = item.keyword_data else { continue };
                let Some(keyword) = data.keyword else { continue };
                if keyword.trim().is_empty() {
                    continue;
                }
                let volume = data
                    .keyword_info
                    .and_then(|i| i.search_volume)
                    .unwrap_or(0)
                    .max(0) as u64;
                let serp = item.ranked_serp_element.and_then(|e| e.serp_item);
                let (rank_position, result_type) = match serp {
                    Some(s) => (
                        s.rank_absolute.unwrap_or(0),
                        s.item_type.unwrap_or(ResultType::Other),
                    ),
                    None => (0, ResultType::Other),
                };
                out.push(RankedKeyword {
                    keyword,
                    search_volume: volume,
                    rank_position,
                    result_type,
                });
            }
        }
    }
    out
}

#[async_trait::async_trait]
impl KeywordDiscovery for DataForSeoClient {
    fn name(&self) -> &'static str {
        "dataforseo"
    }

    async fn discover(&self, seeds: &[String], region: &str) -> Result<Vec<KeywordCandidate>> {
        let seeds: Vec<&str> = seeds.iter().map(String::as_str).take(MAX_SEEDS).collect();
        let body = serde_json::json!([{
            "keywords": seeds,
            "location_name": region,
            "language_name": "English",
            "sort_by": "search_volume",
            "limit": RESULT_LIMIT,
        }]);

        let resp = self
            .client
            .post(Self::keywords_endpoint())
            .basic_auth(&self.login, Some(&self.password))
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Discovery(format!("keyword discovery HTTP {status}")));
        }

        let parsed: KeywordsForKeywordsResponse = resp
            .json()
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;
        let out = candidates_from(parsed);
        tracing::info!(candidates = out.len(), %region, "keyword discovery complete");
        Ok(out)
    }
}

#[async_trait::async_trait]
impl RankedKeywordSource for DataForSeoClient {
    fn name(&self) -> &'static str {
        "dataforseo"
    }

    async fn ranked_for_domain(&self, domain: &str, region: &str) -> Result<Vec<RankedKeyword>> {
        let body = serde_json::json!([{
            "target": domain,
            "location_name": region,
            "language_name": "English",
            "limit": RESULT_LIMIT,
        }]);

        let resp = self
            .client
            .post(Self::ranked_endpoint())
            .basic_auth(&self.login, Some(&self.password))
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Ranking(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Ranking(format!("ranked keywords HTTP {status}")));
        }

        let parsed: RankedKeywordsResponse = resp
            .json()
            .await
            .map_err(|e| Error::Ranking(e.to_string()))?;
        let out = ranked_from(parsed);
        tracing::info!(ranked = out.len(), %domain, "ranked keyword lookup complete");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global; serialize tests that mutate them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        k: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(k: &'static str, v: &str) -> Self {
            let prev = std::env::var(k).ok();
            std::env::set_var(k, v);
            Self { k, prev }
        }

        fn unset(k: &'static str) -> Self {
            let prev = std::env::var(k).ok();
            std::env::remove_var(k);
            Self { k, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(v) = self.prev.take() {
                std::env::set_var(self.k, v);
            } else {
                std::env::remove_var(self.k);
            }
        }
    }

    #[test]
    fn empty_credentials_are_treated_as_missing() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _g1 = EnvGuard::set("KWRANK_DATAFORSEO_LOGIN", "");
        let _g2 = EnvGuard::set("KWRANK_DATAFORSEO_PASSWORD", "   ");
        let _g3 = EnvGuard::unset("DATAFORSEO_LOGIN");
        let _g4 = EnvGuard::unset("DATAFORSEO_PASSWORD");
        assert!(login_from_env().is_none());
        assert!(password_from_env().is_none());
        let err = DataForSeoClient::from_env(reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::NotConfigured(_)), "got {err:?}");
    }

    #[test]
    fn prefixed_credentials_take_precedence() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _g1 = EnvGuard::set("KWRANK_DATAFORSEO_LOGIN", "prefixed");
        let _g2 = EnvGuard::set("DATAFORSEO_LOGIN", "generic");
        assert_eq!(login_from_env().as_deref(), Some("prefixed"));
    }

    #[test]
    fn normalize_domain_strips_scheme_www_and_path() {
        assert_eq!(normalize_domain("https://www.example.com/about?x=1"), "example.com");
        assert_eq!(normalize_domain("http://example.com"), "example.com");
        assert_eq!(normalize_domain("example.com/services"), "example.com");
        assert_eq!(normalize_domain("www.example.co.uk"), "example.co.uk");
        assert_eq!(normalize_domain("  example.com  "), "example.com");
    }

    #[test]
    fn parses_minimal_keywords_shape_and_drops_unusable_rows() {
        let js = r#"
        {
          "tasks": [
            {
              "result": [
                {"keyword": "plumber denver", "search_volume": 500},
                {"keyword": "zero volume", "search_volume": 0},
                {"keyword": "null volume", "search_volume": null},
                {"keyword": "", "search_volume": 10},
                {"search_volume": 10}
              ]
            }
          ]
        }
        "#;
        let parsed: KeywordsForKeywordsResponse = serde_json::from_str(js).unwrap();
        let out = candidates_from(parsed);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].keyword, "plumber denver");
        assert_eq!(out[0].monthly_volume, 500);
    }

    #[test]
    fn parses_minimal_ranked_shape() {
        let js = r#"
        {
          "tasks": [
            {
              "result": [
                {
                  "items": [
                    {
                      "keyword_data": {
                        "keyword": "Denver Plumbers",
                        "keyword_info": {"search_volume": 320}
                      },
                      "ranked_serp_element": {
                        "serp_item": {"rank_absolute": 4, "type": "organic"}
                      }
                    },
                    {
                      "keyword_data": {
                        "keyword": "plumbing company denver",
                        "keyword_info": null
                      },
                      "ranked_serp_element": {
                        "serp_item": {"rank_absolute": 12, "type": "people_also_ask"}
                      }
                    }
                  ]
                }
              ]
            }
          ]
        }
        "#;
        let parsed: RankedKeywordsResponse = serde_json::from_str(js).unwrap();
        let out = ranked_from(parsed);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].keyword, "Denver Plumbers");
        assert_eq!(out[0].search_volume, 320);
        assert_eq!(out[0].rank_position, 4);
        assert_eq!(out[0].result_type, ResultType::Organic);
        assert_eq!(out[1].search_volume, 0);
        assert_eq!(out[1].result_type, ResultType::Other);
    }

    #[test]
    fn empty_payload_parses_to_no_rows() {
        let parsed: KeywordsForKeywordsResponse = serde_json::from_str("{}").unwrap();
        assert!(candidates_from(parsed).is_empty());
        let parsed: RankedKeywordsResponse = serde_json::from_str("{\"tasks\": null}").unwrap();
        assert!(ranked_from(parsed).is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    #[allow(clippy::await_holding_lock)]
    async fn discovery_round_trips_against_a_mock_endpoint() {
        use axum::{routing::post, Json, Router};

        let app = Router::new().route(
            "/keywords",
            post(|| async {
                Json(serde_json::json!({
                    "tasks": [{"result": [
                        {"keyword": "plumber denver", "search_volume": 500},
                        {"keyword": "plumbers denver", "search_volume": 480}
                    ]}]
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _g1 = EnvGuard::set("KWRANK_DATAFORSEO_LOGIN", "login");
        let _g2 = EnvGuard::set("KWRANK_DATAFORSEO_PASSWORD", "password");
        let endpoint = format!("http://{addr}/keywords");
        let _g3 = EnvGuard::set("KWRANK_DATAFORSEO_KEYWORDS_ENDPOINT", &endpoint);

        let client = DataForSeoClient::from_env(reqwest::Client::new()).unwrap();
        let seeds = vec!["plumber denver".to_string()];
        let out = client.discover(&seeds, "Colorado,United States").await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].keyword, "plumber denver");
    }

    #[tokio::test(flavor = "multi_thread")]
    #[allow(clippy::await_holding_lock)]
    async fn ranked_lookup_surfaces_http_errors_as_ranking_failures() {
        use axum::{http::StatusCode, routing::post, Router};

        let app = Router::new().route(
            "/ranked",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _g1 = EnvGuard::set("KWRANK_DATAFORSEO_LOGIN", "login");
        let _g2 = EnvGuard::set("KWRANK_DATAFORSEO_PASSWORD", "password");
        let endpoint = format!("http://{addr}/ranked");
        let _g3 = EnvGuard::set("KWRANK_DATAFORSEO_RANKED_ENDPOINT", &endpoint);

        let client = DataForSeoClient::from_env(reqwest::Client::new()).unwrap();
        let err = client
            .ranked_for_domain("example.com", "United States")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ranking(_)), "got {err:?}");
    }
}
