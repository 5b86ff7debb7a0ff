//! Search entry points.
//!
//! `SearchEngine` is the stateless single-shot orchestrator; the
//! `progressive` module holds the two-phase coordinator.

pub mod progressive;

pub use progressive::{ProgressiveSearch, PHASE_TRANSITION_DELAY};

use crate::config::SearchConfig;
use crate::matching::{ExactStrategy, HybridStrategy, SearchStrategy};
use crate::models::{Record, RecordRef, SearchResult, TextMatch};
use std::cmp::Ordering;
use tracing::debug;

/// Single-shot "search all records under one strategy" orchestrator.
///
/// Defaults to exact-only matching for throughput; callers opt into the
/// hybrid strategy by disabling exact-only mode. A query wrapped in
/// double quotes always forces exact matching.
pub struct SearchEngine {
    exact: ExactStrategy,
    hybrid: HybridStrategy,
    exact_match_only: bool,
}

impl SearchEngine {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            exact: ExactStrategy::new(),
            hybrid: HybridStrategy::new(config),
            exact_match_only: true,
        }
    }

    /// Whether non-quoted queries use the exact strategy only.
    pub fn exact_match_only(&self) -> bool {
        self.exact_match_only
    }

    /// Switch between exact-only (fast) and hybrid (deeper) matching for
    /// non-quoted queries.
    pub fn set_exact_match_only(&mut self, exact_match_only: bool) {
        self.exact_match_only = exact_match_only;
    }

    /// Whether a single record is relevant for the query.
    pub fn matches_search(&self, record: &Record, query: &str) -> bool {
        let (processed, force_exact) = Self::process_query(query);
        self.strategy_for(force_exact).matches(record, processed)
    }

    /// Score all records and return the matches as a finite,
    /// descending-by-score sequence. Restarting means re-invoking the
    /// search; the returned iterator is consumed lazily but not resumable.
    pub fn search(
        &self,
        records: &[RecordRef],
        query: &str,
    ) -> impl Iterator<Item = SearchResult> {
        let (processed, force_exact) = Self::process_query(query);
        let strategy = self.strategy_for(force_exact);

        let mut results = Vec::new();
        for record in records {
            if strategy.matches(record, processed) {
                let score = strategy.calculate_score(record, processed);
                let matches = if record.content.is_empty() {
                    Vec::new()
                } else {
                    strategy.get_matches(&record.content, processed)
                };
                results.push(SearchResult::new(record.clone(), score, matches));
            }
        }

        sort_descending(&mut results);

        debug!(
            strategy = strategy.name(),
            total = records.len(),
            matched = results.len(),
            "search completed"
        );

        results.into_iter()
    }

    /// Match spans of the query within an arbitrary text, under the same
    /// strategy selection rules as `search`.
    pub fn text_matches(&self, text: &str, query: &str) -> Vec<TextMatch> {
        if text.trim().is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        let (processed, force_exact) = Self::process_query(query);
        self.strategy_for(force_exact).get_matches(text, processed)
    }

    fn strategy_for(&self, force_exact: bool) -> &dyn SearchStrategy {
        if force_exact || self.exact_match_only {
            &self.exact
        } else {
            &self.hybrid
        }
    }

    /// Trim the query and detect the quoted-literal form. Blank queries
    /// pass through unchanged and take the non-exact path.
    fn process_query(query: &str) -> (&str, bool) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return (query, false);
        }

        if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
            return (&trimmed[1..trimmed.len() - 1], true);
        }

        (trimmed, false)
    }
}

/// Stable descending sort by score; ties keep input order.
pub(crate) fn sort_descending(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn records() -> Vec<RecordRef> {
        vec![
            Arc::new(Record::new(1, "The Quick Brown Fox")),
            Arc::new(Record::new(2, "quick quick")),
            Arc::new(Record::new(3, "unrelated entry")),
        ]
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(&SearchConfig::default())
    }

    #[test]
    fn test_process_query_trims() {
        assert_eq!(SearchEngine::process_query("  hello  "), ("hello", false));
    }

    #[test]
    fn test_process_query_quoted_forces_exact() {
        assert_eq!(SearchEngine::process_query("\"hello\""), ("hello", true));
        assert_eq!(
            SearchEngine::process_query("  \"two words\"  "),
            ("two words", true)
        );
        // A single quote char is not a quoted query
        assert_eq!(SearchEngine::process_query("\""), ("\"", false));
    }

    #[test]
    fn test_process_query_blank_is_non_exact() {
        assert_eq!(SearchEngine::process_query("   "), ("   ", false));
    }

    #[test]
    fn test_search_descending_by_score() {
        let mut engine = engine();
        engine.set_exact_match_only(false);

        let results: Vec<_> = engine.search(&records(), "quick").collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let results: Vec<_> = engine().search(&records(), "   ").collect();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.score == 1.0));
    }

    #[test]
    fn test_quoted_query_end_to_end() {
        let mut engine = engine();
        // Even with hybrid selected, quotes force the exact strategy.
        engine.set_exact_match_only(false);

        let results: Vec<_> = engine.search(&records(), "\"quick\"").collect();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score == 1.0));

        let record2 = results.iter().find(|r| r.record.id == 2).unwrap();
        assert_eq!(record2.matches.len(), 2);
        let record1 = results.iter().find(|r| r.record.id == 1).unwrap();
        assert_eq!(record1.matches.len(), 1);
    }

    #[test]
    fn test_exact_only_skips_fuzzy_matches() {
        let mut engine = engine();

        let exact_only: Vec<_> = engine.search(&records(), "qwick").collect();
        assert!(exact_only.is_empty());

        engine.set_exact_match_only(false);
        let hybrid: Vec<_> = engine.search(&records(), "qwick").collect();
        assert!(!hybrid.is_empty());
    }

    #[test]
    fn test_matches_search_and_text_matches() {
        let engine = engine();
        let record = Record::new(7, "hello world");

        assert!(engine.matches_search(&record, "hello"));
        assert!(!engine.matches_search(&record, "absent"));

        let spans = engine.text_matches("hello hello", "hello");
        assert_eq!(spans.len(), 2);
        assert!(engine.text_matches("", "hello").is_empty());
    }

    #[test]
    fn test_sort_ties_keep_input_order() {
        let a = Arc::new(Record::new(1, "quick one"));
        let b = Arc::new(Record::new(2, "quick two"));
        let results: Vec<_> = engine().search(&[a, b], "quick").collect();
        assert_eq!(results[0].record.id, 1);
        assert_eq!(results[1].record.id, 2);
    }
}
