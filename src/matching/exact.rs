//! Exact (case-insensitive substring) matching strategy.

use crate::matching::strategy::SearchStrategy;
use crate::models::{Record, TextMatch};
use regex::RegexBuilder;

/// Case-insensitive literal substring matching. The cheapest strategy,
/// used for the fast first pass and for quoted queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactStrategy;

impl ExactStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SearchStrategy for ExactStrategy {
    fn name(&self) -> &'static str {
        "Exact"
    }

    fn calculate_score(&self, record: &Record, query: &str) -> f64 {
        if query.trim().is_empty() {
            return 1.0;
        }

        let searchable = record.searchable_content();
        if searchable.to_lowercase().contains(&query.to_lowercase()) {
            1.0
        } else {
            0.0
        }
    }

    fn get_matches(&self, text: &str, query: &str) -> Vec<TextMatch> {
        if text.trim().is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        // Escaped literal, so the build cannot fail in practice; an empty
        // span list is the safe outcome if it somehow does.
        let regex = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => regex,
            Err(_) => return Vec::new(),
        };

        // find_iter resumes after each match end, so occurrences never
        // overlap and repeated patterns are not double-counted.
        regex
            .find_iter(text)
            .map(|m| TextMatch::new(m.start(), m.end() - m.start(), 1.0))
            .collect()
    }

    fn minimum_score_threshold(&self) -> f64 {
        0.5
    }
}
