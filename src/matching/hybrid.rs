//! Hybrid matching strategy.
//!
//! Composes the exact, fuzzy, and word-token strategies: exact matches
//! dominate absolutely, and the fuzzy/token signals are discounted so a
//! true exact hit always ranks above them.

use crate::config::SearchConfig;
use crate::matching::exact::ExactStrategy;
use crate::matching::fuzzy::FuzzyStrategy;
use crate::matching::merge::merge_overlapping;
use crate::matching::strategy::SearchStrategy;
use crate::matching::word_token::WordTokenStrategy;
use crate::models::{Record, TextMatch};

/// Weight applied to the fuzzy score when no exact match exists.
const FUZZY_WEIGHT: f64 = 0.9;

/// Weight applied to the token score; lower than fuzzy to reflect its
/// lower precision.
const TOKEN_WEIGHT: f64 = 0.85;

/// Blended strategy used for the enhancement pass and non-exact search.
#[derive(Debug, Clone)]
pub struct HybridStrategy {
    exact: ExactStrategy,
    fuzzy: FuzzyStrategy,
    token: WordTokenStrategy,
}

impl HybridStrategy {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            exact: ExactStrategy::new(),
            fuzzy: FuzzyStrategy::new(config),
            token: WordTokenStrategy::new(config),
        }
    }
}

impl Default for HybridStrategy {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl SearchStrategy for HybridStrategy {
    fn name(&self) -> &'static str {
        "Hybrid"
    }

    fn calculate_score(&self, record: &Record, query: &str) -> f64 {
        if query.trim().is_empty() {
            return 1.0;
        }

        if self.exact.calculate_score(record, query) > 0.0 {
            return 1.0;
        }

        let fuzzy_score = self.fuzzy.calculate_score(record, query);
        let token_score = self.token.calculate_score(record, query);

        (fuzzy_score * FUZZY_WEIGHT).max(token_score * TOKEN_WEIGHT)
    }

    fn get_matches(&self, text: &str, query: &str) -> Vec<TextMatch> {
        if text.trim().is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        // Exact spans win outright; fuzzy/token spans are never blended in.
        let exact_matches = self.exact.get_matches(text, query);
        if !exact_matches.is_empty() {
            return exact_matches;
        }

        let mut all_matches = self.fuzzy.get_matches(text, query);
        all_matches.extend(self.token.get_matches(text, query));

        merge_overlapping(all_matches)
    }

    fn minimum_score_threshold(&self) -> f64 {
        // Lower than the component thresholds since the signals are
        // already blended and discounted.
        0.3
    }
}
