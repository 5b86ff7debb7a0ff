//! Word-token matching strategy.
//!
//! Tokenizes query and content into word-boundary tokens and scores on
//! token-level similarity, so multi-word queries match regardless of
//! word order.

use crate::config::SearchConfig;
use crate::matching::merge::merge_overlapping;
use crate::matching::similarity::{ratio, token_set_ratio, token_sort_ratio};
use crate::matching::strategy::SearchStrategy;
use crate::models::{Record, TextMatch};
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());

/// Token-set matching for multi-word queries.
#[derive(Debug, Clone)]
pub struct WordTokenStrategy {
    minimum_token_score: u8,
}

impl WordTokenStrategy {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            minimum_token_score: config.token_minimum_score,
        }
    }

    /// Lowercase word-boundary tokens longer than one char, deduplicated.
    fn tokenize(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut tokens: Vec<String> = Vec::new();

        for token in WORD_BOUNDARY_RE.find_iter(&lower) {
            let token = token.as_str();
            if token.chars().take(2).count() > 1 && !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }

        tokens
    }
}

impl Default for WordTokenStrategy {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl SearchStrategy for WordTokenStrategy {
    fn name(&self) -> &'static str {
        "Word Token"
    }

    fn calculate_score(&self, record: &Record, query: &str) -> f64 {
        if query.trim().is_empty() {
            return 1.0;
        }

        let searchable = record.searchable_content();
        if searchable.trim().is_empty() {
            return 0.0;
        }

        let query_tokens = Self::tokenize(query);
        let content_tokens = Self::tokenize(&searchable);

        if query_tokens.is_empty() || content_tokens.is_empty() {
            return 0.0;
        }

        let mut candidate_scores = vec![
            f64::from(token_sort_ratio(query, &searchable)) / 100.0,
            f64::from(token_set_ratio(query, &searchable)) / 100.0,
        ];

        // Completeness bonus: when every query token finds a good content
        // token, the average of those best per-token scores competes too.
        let minimum = f64::from(self.minimum_token_score) / 100.0;
        let mut all_tokens_matched = true;
        let mut per_token_best = Vec::with_capacity(query_tokens.len());

        for query_token in &query_tokens {
            let best = content_tokens
                .iter()
                .map(|content_token| f64::from(ratio(query_token, content_token)) / 100.0)
                .fold(0.0, f64::max);

            if best < minimum {
                all_tokens_matched = false;
            }
            per_token_best.push(best);
        }

        if all_tokens_matched && !per_token_best.is_empty() {
            let average = per_token_best.iter().sum::<f64>() / per_token_best.len() as f64;
            candidate_scores.push(average);
        }

        candidate_scores.into_iter().fold(0.0, f64::max)
    }

    fn get_matches(&self, text: &str, query: &str) -> Vec<TextMatch> {
        if text.trim().is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        let query_tokens = Self::tokenize(query);
        let mut matches = Vec::new();

        for query_token in &query_tokens {
            for word in WORD_BOUNDARY_RE.find_iter(text) {
                let score = ratio(query_token, word.as_str());
                if score >= self.minimum_token_score {
                    matches.push(TextMatch::new(
                        word.start(),
                        word.end() - word.start(),
                        f64::from(score) / 100.0,
                    ));
                }
            }
        }

        merge_overlapping(matches)
    }

    fn minimum_score_threshold(&self) -> f64 {
        f64::from(self.minimum_token_score) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> WordTokenStrategy {
        WordTokenStrategy::default()
    }

    #[test]
    fn test_tokenize_filters_and_dedupes() {
        let tokens = WordTokenStrategy::tokenize("The cat, the Cat & a hat!");
        assert_eq!(tokens, vec!["the", "cat", "hat"]);
    }

    #[test]
    fn test_score_reordered_words() {
        let record = Record::new(1, "brown fox jumps");
        let score = token().calculate_score(&record, "fox brown");
        assert!(score >= 0.9, "got {}", score);
    }

    #[test]
    fn test_score_all_tokens_matched_bonus() {
        let record = Record::new(1, "meeting notes from standup yesterday");
        let score = token().calculate_score(&record, "standup notes");
        // Both tokens match exactly, so the completeness average is 1.0.
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_score_zero_when_no_usable_tokens() {
        let record = Record::new(1, "some text");
        // Single-char tokens are filtered out, leaving no query tokens.
        assert_eq!(token().calculate_score(&record, "a b c"), 0.0);
    }

    #[test]
    fn test_blank_query_scores_one() {
        let record = Record::new(1, "text");
        assert_eq!(token().calculate_score(&record, "  "), 1.0);
    }

    #[test]
    fn test_get_matches_spans_per_token() {
        let spans = token().get_matches("alpha beta gamma", "gamma alpha");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].length, 5);
        assert_eq!(spans[1].start, 11);
        assert_eq!(spans[1].length, 5);
    }

    #[test]
    fn test_get_matches_merges_overlaps() {
        // Both query tokens hit the same word; the merger collapses the
        // duplicate spans and keeps the higher score.
        let spans = token().get_matches("testing", "testing testings");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].score, 1.0);
    }

    #[test]
    fn test_get_matches_sorted_ascending() {
        let spans = token().get_matches("beta alpha beta", "beta");
        assert!(spans.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_matches_respects_configured_minimum() {
        let record = Record::new(1, "deployment checklist");
        let lenient = WordTokenStrategy::new(&SearchConfig::new(60, 80, 50).unwrap());
        let strict = WordTokenStrategy::new(&SearchConfig::new(60, 80, 95).unwrap());

        assert!(lenient.matches(&record, "deploy"));
        assert!(!strict.matches(&record, "deploy"));
    }
}
