//! Overlap merging for match spans.
//!
//! Strategies that combine spans from independent scans use this to
//! collapse them into a minimal covering list, so consumers never see
//! overlapping or visually adjacent highlight fragments.

use crate::models::TextMatch;

/// Collapse a span list into non-overlapping spans sorted ascending by
/// start.
///
/// Adjacency counts as overlap: a span starting exactly where the
/// current one ends is merged into it. Each merged span keeps the
/// highest score of its contributors. Merging an already-merged list
/// returns it unchanged.
pub fn merge_overlapping(mut matches: Vec<TextMatch>) -> Vec<TextMatch> {
    if matches.is_empty() {
        return matches;
    }

    matches.sort_by_key(|m| m.start);

    let mut merged = Vec::with_capacity(matches.len());
    let mut current = matches[0];

    for next in matches.into_iter().skip(1) {
        if current.end() >= next.start {
            let end = current.end().max(next.end());
            current = TextMatch::new(
                current.start,
                end - current.start,
                current.score.max(next.score),
            );
        } else {
            merged.push(current);
            current = next;
        }
    }

    merged.push(current);
    merged
}
