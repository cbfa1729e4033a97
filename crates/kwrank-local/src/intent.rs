//! Search-intent normalization.
//!
//! One normalization function parameterized by mode plus the city list, so
//! the two call sites share a single suffix stemmer. `Dedup` merges
//! near-duplicate candidates within one candidate set; `CrossRef` matches a
//! candidate against the site's actual ranked keywords and must tolerate
//! morphological variants that `Dedup` intentionally keeps apart.

use kwrank_core::KeywordCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentMode {
    /// Collapse near-duplicates within one candidate set. With known cities
    /// the remaining words are compared with only a plural fold, so "house
    /// painter" and "painting contractor" stay distinct; without cities
    /// there is no city token to anchor variation and normalization stems
    /// and drops stop words.
    Dedup,
    /// Cross-dataset matching: always stem, so "painter"/"painting"/
    /// "painters" land on one stem.
    CrossRef,
}

// Ordered longest-first; the first suffix whose removal leaves a stem of at
// least MIN_STEM_LEN characters wins.
const SUFFIXES: &[&str] = &["ians", "ers", "ing", "ors", "ian", "er", "or", "al", "s"];

const MIN_STEM_LEN: usize = 4;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "for", "of", "in", "on", "to", "with", "near", "me", "my",
    "your",
];

/// Heuristic suffix stripper, not a linguistic stemmer. Words of length <= 4
/// are returned unchanged.
pub fn stem(word: &str) -> &str {
    if word.len() <= MIN_STEM_LEN {
        return word;
    }
    for suffix in SUFFIXES {
        if let Some(stripped) = word.strip_suffix(suffix) {
            if stripped.len() >= MIN_STEM_LEN {
                return stripped;
            }
        }
    }
    word
}

/// Plural fold for the literal (local) dedup comparison: "plumbers denver"
/// and "plumber denver" are one intent, while "-er"/"-ing" service framings
/// stay apart. "ss" endings ("glass") are left alone.
fn fold_plural(word: &str) -> &str {
    if word.len() > MIN_STEM_LEN && !word.ends_with("ss") {
        word.strip_suffix('s').unwrap_or(word)
    } else {
        word
    }
}

/// Canonical key for the search intent a keyword expresses.
pub fn intent_key(keyword: &str, cities: &[String], mode: IntentMode) -> String {
    let mut text = keyword.to_lowercase();
    for city in cities {
        let city = city.trim().to_lowercase();
        if city.is_empty() {
            continue;
        }
        if text.contains(&city) {
            text = text.replace(&city, " ");
        }
    }

    let mut words: Vec<&str> = text.split_whitespace().collect();
    // City removal can leave a dangling state abbreviation ("plumber denver
    // co" -> "plumber co").
    if words
        .last()
        .is_some_and(|w| w.len() == 2 && w.chars().all(|c| c.is_ascii_alphabetic()))
    {
        words.pop();
    }

    let strip_stop_words = mode == IntentMode::Dedup && cities.is_empty();
    let apply_stemmer = mode == IntentMode::CrossRef || cities.is_empty();

    let mut out: Vec<String> = Vec::new();
    for word in words {
        if strip_stop_words && STOP_WORDS.contains(&word) {
            continue;
        }
        let word = if apply_stemmer {
            stem(word)
        } else {
            fold_plural(word)
        };
        out.push(word.to_string());
    }
    out.sort_unstable();
    if apply_stemmer {
        out.dedup();
    }
    out.join(" ")
}

/// Collapse candidates that share a `Dedup` intent key, keeping the highest
/// volume per key; ties keep the first encountered. Group order is
/// first-seen order.
pub fn dedupe_candidates(candidates: Vec<KeywordCandidate>, cities: &[String]) -> Vec<KeywordCandidate> {
    let mut index: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    let mut out: Vec<KeywordCandidate> = Vec::new();
    for cand in candidates {
        let key = intent_key(&cand.keyword, cities, IntentMode::Dedup);
        match index.get(&key) {
            Some(&i) => {
                if cand.monthly_volume > out[i].monthly_volume {
                    out[i] = cand;
                }
            }
            None => {
                index.insert(key, out.len());
                out.push(cand);
            }
        }
    }
    out
}
