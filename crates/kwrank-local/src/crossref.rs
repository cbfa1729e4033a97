//! Flags which final keywords the site already ranks for.
//!
//! Membership is purely normalized-string comparison against the ranked
//! keyword list; nothing is inferred from business semantics. An empty
//! ranked list (the lookup is allowed to fail upstream) marks every keyword
//! absent, the conservative default.

use std::collections::BTreeSet;

use kwrank_core::{KeywordCandidate, KeywordOpportunity, RankedKeyword};

use crate::intent::{intent_key, IntentMode};

pub fn cross_reference(
    finals: &[KeywordCandidate],
    ranked: &[RankedKeyword],
    cities: &[String],
) -> Vec<KeywordOpportunity> {
    let mut exact: BTreeSet<String> = BTreeSet::new();
    let mut intents: BTreeSet<String> = BTreeSet::new();
    for r in ranked {
        exact.insert(r.keyword.to_lowercase());
        let key = intent_key(&r.keyword, cities, IntentMode::CrossRef);
        // A ranked keyword that is nothing but city/state tokens has no
        // intent left to match on.
        if !key.is_empty() {
            intents.insert(key);
        }
    }

    finals
        .iter()
        .map(|cand| {
            let on_existing_site = exact.contains(&cand.keyword.to_lowercase()) || {
                let key = intent_key(&cand.keyword, cities, IntentMode::CrossRef);
                !key.is_empty() && intents.contains(&key)
            };
            KeywordOpportunity {
                keyword: cand.keyword.clone(),
                monthly_volume: cand.monthly_volume,
                on_existing_site,
            }
        })
        .collect()
}
