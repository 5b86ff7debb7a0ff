//! Progressive two-phase search coordinator.
//!
//! Phase 1 runs the cheap exact strategy over every record and reports
//! whether a deeper pass is worthwhile; phase 2 runs the hybrid strategy
//! over only the records phase 1 missed, discounts those scores, and
//! merges. Both phases run on the blocking thread pool and honor a
//! cancellation token at per-record granularity, so cancelling is
//! bounded-latency and never exposes a half-built result list.

use crate::config::SearchConfig;
use crate::error::{EngineResult, SearchError};
use crate::matching::{ExactStrategy, HybridStrategy, SearchStrategy};
use crate::models::{
    ProgressiveSearchResult, RecordRef, SearchPhase, SearchResult,
};
use crate::search::sort_descending;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Pause between delivering phase-1 results and starting phase 2, so a
/// consumer can render the intermediate list before the CPU-heavier pass.
pub const PHASE_TRANSITION_DELAY: Duration = Duration::from_millis(50);

/// Flat discount applied to every phase-2 score so exact matches stay
/// ranked above fuzzy ones after the merge.
const ENHANCED_SCORE_DISCOUNT: f64 = 0.85;

/// Queries shorter than this never trigger enhancement.
const MIN_QUERY_CHARS_FOR_ENHANCEMENT: usize = 3;

/// With at least this many phase-1 results, enhancement is skipped.
const SUFFICIENT_RESULT_COUNT: usize = 5;

/// With at most this many phase-1 results, enhancement always runs.
const SPARSE_RESULT_COUNT: usize = 2;

/// Two-phase search coordinator.
///
/// Stateless between calls: each phase is a pure scan over the supplied
/// snapshot, and the caller owns the protocol (whether and when to run
/// phase 2, and cancelling a superseded query's phases).
pub struct ProgressiveSearch {
    exact: ExactStrategy,
    hybrid: HybridStrategy,
}

impl ProgressiveSearch {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            exact: ExactStrategy::new(),
            hybrid: HybridStrategy::new(config),
        }
    }

    /// Phase 1: exact strategy over every record.
    ///
    /// Returns an `Exact`-tagged result whose `needs_enhancement` flag is
    /// computed by [`ProgressiveSearch::should_enhance`]. Cancellation is
    /// checked before each record and surfaces as
    /// [`SearchError::Cancelled`].
    pub async fn search_phase1(
        &self,
        records: &[RecordRef],
        query: &str,
        cancel: CancellationToken,
    ) -> EngineResult<ProgressiveSearchResult> {
        let records = records.to_vec();
        let query = query.to_string();
        let exact = self.exact;

        run_scan(move || {
            let total = records.len();
            let mut results = Vec::new();

            for record in &records {
                if cancel.is_cancelled() {
                    return Err(SearchError::Cancelled);
                }

                if exact.matches(record, &query) {
                    let score = exact.calculate_score(record, &query);
                    let matches = exact.get_matches(&record.content, &query);
                    results.push(SearchResult::new(record.clone(), score, matches));
                }
            }

            sort_descending(&mut results);
            let needs_enhancement = Self::should_enhance(&results, &query);

            debug!(
                total,
                matched = results.len(),
                needs_enhancement,
                "phase 1 (exact) completed"
            );

            Ok(ProgressiveSearchResult {
                phase: SearchPhase::Exact,
                is_complete: !needs_enhancement,
                needs_enhancement,
                results,
            })
        })
        .await
    }

    /// Phase 2: hybrid strategy over the records phase 1 did not match.
    ///
    /// Phase-1 results pass through with their scores untouched; new
    /// hybrid results are discounted by a flat 15% before the combined
    /// list is re-sorted. The returned `Enhanced` result is terminal.
    pub async fn search_phase2(
        &self,
        records: &[RecordRef],
        query: &str,
        phase1_results: Vec<SearchResult>,
        cancel: CancellationToken,
    ) -> EngineResult<ProgressiveSearchResult> {
        let records = records.to_vec();
        let query = query.to_string();
        let hybrid = self.hybrid.clone();

        run_scan(move || {
            let phase1_ids: HashSet<u64> =
                phase1_results.iter().map(|r| r.record.id).collect();
            let mut enhanced = Vec::new();

            for record in records.iter().filter(|r| !phase1_ids.contains(&r.id)) {
                if cancel.is_cancelled() {
                    return Err(SearchError::Cancelled);
                }

                if hybrid.matches(record, &query) {
                    let score = hybrid.calculate_score(record, &query) * ENHANCED_SCORE_DISCOUNT;
                    let matches = hybrid.get_matches(&record.content, &query);
                    enhanced.push(SearchResult::new(record.clone(), score, matches));
                }
            }

            debug!(
                carried = phase1_results.len(),
                enhanced = enhanced.len(),
                "phase 2 (hybrid) completed"
            );

            let mut combined = phase1_results;
            combined.extend(enhanced);
            sort_descending(&mut combined);

            Ok(ProgressiveSearchResult {
                phase: SearchPhase::Enhanced,
                is_complete: true,
                needs_enhancement: false,
                results: combined,
            })
        })
        .await
    }

    /// Run both phases, delivering each result set over `sender` as it
    /// becomes ready, with the cancellable render pause in between.
    pub async fn search_streaming(
        &self,
        records: &[RecordRef],
        query: &str,
        sender: mpsc::Sender<ProgressiveSearchResult>,
        cancel: CancellationToken,
    ) -> EngineResult<()> {
        let phase1 = self.search_phase1(records, query, cancel.clone()).await?;
        let needs_enhancement = phase1.needs_enhancement;
        let phase1_results = phase1.results.clone();

        sender
            .send(phase1)
            .await
            .map_err(|_| SearchError::ChannelClosed)?;

        if !needs_enhancement {
            return Ok(());
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            _ = tokio::time::sleep(PHASE_TRANSITION_DELAY) => {}
        }

        let phase2 = self
            .search_phase2(records, query, phase1_results, cancel)
            .await?;

        sender
            .send(phase2)
            .await
            .map_err(|_| SearchError::ChannelClosed)?;

        Ok(())
    }

    /// Heuristic deciding whether phase 2 is worth running.
    ///
    /// Blank or very short queries never enhance; five or more phase-1
    /// results are already enough; two or fewer always enhance; in
    /// between, only multi-word queries do (the token strategy helps
    /// them most).
    pub fn should_enhance(exact_results: &[SearchResult], query: &str) -> bool {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return false;
        }

        if trimmed.chars().count() < MIN_QUERY_CHARS_FOR_ENHANCEMENT {
            return false;
        }

        if exact_results.len() >= SUFFICIENT_RESULT_COUNT {
            return false;
        }

        if exact_results.len() <= SPARSE_RESULT_COUNT {
            return true;
        }

        query.split_whitespace().count() > 1
    }
}

/// Run a synchronous scan on the blocking pool. A join failure (the scan
/// panicked) propagates as a task failure rather than being swallowed.
async fn run_scan<T, F>(scan: F) -> EngineResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> EngineResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(scan)
        .await
        .map_err(|e| SearchError::TaskFailed(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use std::sync::Arc;

    fn result_stub(id: u64) -> SearchResult {
        SearchResult::new(Arc::new(Record::new(id, "stub")), 1.0, Vec::new())
    }

    fn stubs(n: usize) -> Vec<SearchResult> {
        (0..n as u64).map(result_stub).collect()
    }

    #[test]
    fn test_should_enhance_blank_query() {
        assert!(!ProgressiveSearch::should_enhance(&stubs(0), ""));
        assert!(!ProgressiveSearch::should_enhance(&stubs(0), "   "));
    }

    #[test]
    fn test_should_enhance_short_query() {
        assert!(!ProgressiveSearch::should_enhance(&stubs(0), "ab"));
        assert!(!ProgressiveSearch::should_enhance(&stubs(0), " ab "));
    }

    #[test]
    fn test_should_enhance_enough_results() {
        assert!(!ProgressiveSearch::should_enhance(&stubs(6), "hello world"));
        assert!(!ProgressiveSearch::should_enhance(&stubs(5), "hello"));
    }

    #[test]
    fn test_should_enhance_sparse_results() {
        assert!(ProgressiveSearch::should_enhance(&stubs(1), "hello"));
        assert!(ProgressiveSearch::should_enhance(&stubs(2), "hello"));
        assert!(ProgressiveSearch::should_enhance(&stubs(0), "abc"));
    }

    #[test]
    fn test_should_enhance_mid_range_needs_multiple_tokens() {
        assert!(!ProgressiveSearch::should_enhance(&stubs(3), "test"));
        assert!(ProgressiveSearch::should_enhance(&stubs(3), "test case"));
        assert!(ProgressiveSearch::should_enhance(&stubs(4), "test case"));
        assert!(!ProgressiveSearch::should_enhance(&stubs(4), "test"));
    }
}
