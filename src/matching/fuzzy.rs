//! Fuzzy matching strategy.
//!
//! Scores with a substring-aware similarity for short queries and a
//! token-set similarity for long ones, with a boost for exact source-app
//! hits. Span extraction prefers literal occurrences and falls back to a
//! per-word scan.

use crate::config::SearchConfig;
use crate::matching::similarity::{partial_ratio, ratio, token_set_ratio};
use crate::matching::strategy::SearchStrategy;
use crate::models::{Record, TextMatch};
use regex::RegexBuilder;

/// Queries at or below this length use the windowed partial ratio;
/// longer queries use the token-set ratio instead.
const PARTIAL_RATIO_MAX_QUERY_CHARS: usize = 20;

/// Content longer than this is only scored through the joined searchable
/// content, not a second content-only pass.
const CONTENT_ONLY_PASS_MAX_CHARS: usize = 1000;

/// Floor applied when the query is an exact substring of the source-app
/// label. Rewards searches by application name.
const SOURCE_APP_BOOST: u8 = 95;

/// Word delimiters for the span-extraction fallback scan.
const WORD_DELIMITERS: &[char] = &[' ', '\t', '\n', '\r', '.', ',', ';', ':', '!', '?'];

/// Similarity-based matching tolerant of typos and partial words.
#[derive(Debug, Clone)]
pub struct FuzzyStrategy {
    minimum_score: u8,
    high_quality_score: u8,
}

impl FuzzyStrategy {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            minimum_score: config.fuzzy_minimum_score,
            high_quality_score: config.fuzzy_high_quality_score,
        }
    }
}

impl Default for FuzzyStrategy {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl SearchStrategy for FuzzyStrategy {
    fn name(&self) -> &'static str {
        "Fuzzy"
    }

    fn calculate_score(&self, record: &Record, query: &str) -> f64 {
        if query.trim().is_empty() {
            return 1.0;
        }

        let searchable = record.searchable_content();
        if searchable.trim().is_empty() {
            return 0.0;
        }

        let mut best = 0u8;

        if query.chars().take(PARTIAL_RATIO_MAX_QUERY_CHARS + 1).count()
            <= PARTIAL_RATIO_MAX_QUERY_CHARS
        {
            best = best.max(partial_ratio(query, &searchable));

            // A second pass over the content alone sharpens accuracy when
            // the metadata fields would otherwise dilute the window scan.
            if !record.content.is_empty()
                && record.content.chars().take(CONTENT_ONLY_PASS_MAX_CHARS + 1).count()
                    <= CONTENT_ONLY_PASS_MAX_CHARS
            {
                best = best.max(partial_ratio(query, &record.content));
            }
        } else {
            best = best.max(token_set_ratio(query, &searchable));
        }

        if let Some(ref source_app) = record.source_app {
            if source_app.to_lowercase().contains(&query.to_lowercase()) {
                best = best.max(SOURCE_APP_BOOST);
            }
        }

        f64::from(best) / 100.0
    }

    fn get_matches(&self, text: &str, query: &str) -> Vec<TextMatch> {
        if text.trim().is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        // Cheap path: every literal occurrence. Scanning the original
        // text with a case-insensitive literal regex keeps the byte
        // offsets true even where lowercasing would change byte lengths.
        let mut matches: Vec<TextMatch> = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => regex
                .find_iter(text)
                .map(|m| TextMatch::new(m.start(), m.end() - m.start(), 1.0))
                .collect(),
            Err(_) => Vec::new(),
        };

        if !matches.is_empty() {
            return matches;
        }

        // No literal hit: scan word by word against the first query word
        // only. A deliberate trade-off; later tokens of a multi-word
        // query do not drive word-level spans.
        let Some(first_query_word) = query.split(' ').find(|w| !w.is_empty()) else {
            return matches;
        };

        let mut current_pos = 0;
        for word in text.split(WORD_DELIMITERS).filter(|w| !w.is_empty()) {
            // The word came verbatim from `text`, so a forward scan from
            // the previous position always finds its true offset.
            if let Some(found) = text.get(current_pos..).and_then(|rest| rest.find(word)) {
                let word_index = current_pos + found;
                current_pos = word_index + word.len();

                let score = ratio(first_query_word, word);
                if score >= self.high_quality_score {
                    matches.push(TextMatch::new(
                        word_index,
                        word.len(),
                        f64::from(score) / 100.0,
                    ));
                }
            }
        }

        matches
    }

    fn minimum_score_threshold(&self) -> f64 {
        f64::from(self.minimum_score) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuzzy() -> FuzzyStrategy {
        FuzzyStrategy::default()
    }

    #[test]
    fn test_score_exact_substring_is_perfect() {
        let record = Record::new(1, "the quick brown fox");
        assert_eq!(fuzzy().calculate_score(&record, "quick"), 1.0);
    }

    #[test]
    fn test_score_typo_still_high() {
        let record = Record::new(1, "the quick brown fox");
        let score = fuzzy().calculate_score(&record, "qwick");
        assert!(score >= 0.6, "got {}", score);
    }

    #[test]
    fn test_score_long_query_uses_token_set() {
        let record = Record::new(1, "error: connection refused while contacting upstream server");
        // 27 chars, above the partial-ratio cutoff
        let score = fuzzy().calculate_score(&record, "upstream connection refused");
        assert!(score >= 0.9, "got {}", score);
    }

    #[test]
    fn test_source_app_substring_boost() {
        let record = Record::new(1, "completely unrelated body").with_source_app("Firefox");
        let score = fuzzy().calculate_score(&record, "firefox");
        assert!(score >= 0.95, "got {}", score);
    }

    #[test]
    fn test_blank_query_scores_one_and_empty_content_zero() {
        let record = Record::new(1, "");
        assert_eq!(fuzzy().calculate_score(&record, " "), 1.0);
        assert_eq!(fuzzy().calculate_score(&record, "query"), 0.0);
    }

    #[test]
    fn test_get_matches_exact_occurrences_first() {
        let spans = fuzzy().get_matches("foo bar foo", "foo");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[1].start, 8);
        assert!(spans.iter().all(|s| s.score == 1.0));
    }

    #[test]
    fn test_get_matches_word_fallback_on_typo() {
        let spans = fuzzy().get_matches("the quick brown fox", "quickk");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 4);
        assert_eq!(spans[0].length, 5);
        assert!(spans[0].score < 1.0);
    }

    #[test]
    fn test_get_matches_only_first_query_word_drives_fallback() {
        // "brown" alone would match the third word, but only "quickk"
        // (the first query word) is compared in the fallback scan.
        let spans = fuzzy().get_matches("the quick brown fox", "quickk brown");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 4);
    }

    #[test]
    fn test_get_matches_offsets_survive_multibyte_lowercasing() {
        // 'İ' (U+0130) grows from 2 to 3 bytes under to_lowercase, so
        // offsets must come from the original text, not a lowered copy.
        let text = "İstanbul trip";
        let spans = fuzzy().get_matches(text, "stanbul");

        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end()], "stanbul");

        let text = "note İstanbul";
        let spans = fuzzy().get_matches(text, "stanbul");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].end() <= text.len());
        assert_eq!(&text[spans[0].start..spans[0].end()], "stanbul");
    }

    #[test]
    fn test_get_matches_blank_inputs() {
        assert!(fuzzy().get_matches("", "query").is_empty());
        assert!(fuzzy().get_matches("text", " ").is_empty());
    }

    #[test]
    fn test_matches_respects_configured_minimum() {
        let strict = FuzzyStrategy::new(&SearchConfig::new(90, 95, 70).unwrap());
        let record = Record::new(1, "the quick brown fox");
        // ~80 similarity on the best window, below a 90 minimum
        assert!(!strict.matches(&record, "qwikk"));
        assert!(strict.matches(&record, "quick"));
    }
}
