//! Final selection with diversity caps.
//!
//! Pure volume ordering lets one city or one topic take every slot, so the
//! first pass caps contributions per bucket. The second pass backfills from
//! the same sorted order, ignoring the caps, so the pipeline never returns
//! fewer results than are available. Output order is selection order.

use kwrank_core::{BusinessProfile, KeywordCandidate};

use crate::intent::{intent_key, IntentMode};

/// Target size of the final keyword list.
pub const MAX_RESULTS: usize = 10;
/// Local profiles: entries one city may contribute before being skipped.
pub const CITY_CAP: usize = 3;
/// Non-local profiles: entries one core topic may contribute.
pub const TOPIC_CAP: usize = 2;

pub fn select_top(
    candidates: &[KeywordCandidate],
    profile: &BusinessProfile,
) -> Vec<KeywordCandidate> {
    let mut sorted: Vec<&KeywordCandidate> = candidates.iter().collect();
    // Stable: ties keep their input order.
    sorted.sort_by(|a, b| b.monthly_volume.cmp(&a.monthly_volume));

    let cities: Vec<String> = profile
        .known_cities()
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut picked: Vec<usize> = Vec::new();
    let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    for (i, cand) in sorted.iter().enumerate() {
        if picked.len() == MAX_RESULTS {
            break;
        }
        let (bucket, cap) = if profile.is_local {
            (first_city_in(&cand.keyword, &cities), CITY_CAP)
        } else {
            (Some(core_topic(&cand.keyword)), TOPIC_CAP)
        };
        match bucket {
            Some(key) => {
                let n = counts.entry(key).or_insert(0);
                if *n >= cap {
                    continue;
                }
                *n += 1;
                picked.push(i);
            }
            // No recognizable city: nothing to cap on.
            None => picked.push(i),
        }
    }

    if picked.len() < MAX_RESULTS {
        let capped: std::collections::BTreeSet<usize> = picked.iter().copied().collect();
        for i in 0..sorted.len() {
            if picked.len() == MAX_RESULTS {
                break;
            }
            if !capped.contains(&i) {
                picked.push(i);
            }
        }
    }

    picked.into_iter().map(|i| sorted[i].clone()).collect()
}

/// First known city (in city-list order) found in the keyword.
fn first_city_in(keyword: &str, cities: &[String]) -> Option<String> {
    let lower = keyword.to_lowercase();
    cities
        .iter()
        .find(|c| !c.is_empty() && lower.contains(c.as_str()))
        .cloned()
}

/// Core-topic key: the two longest words of the keyword's dedup intent. The
/// intent is already alphabetical, which breaks length ties deterministically.
fn core_topic(keyword: &str) -> String {
    let key = intent_key(keyword, &[], IntentMode::Dedup);
    let mut words: Vec<&str> = key.split_whitespace().collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    words.truncate(2);
    words.join(" ")
}
