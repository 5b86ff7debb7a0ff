//! String similarity primitives used by the matching strategies.
//!
//! All measures are pure, case-insensitive, and return scores on a 0-100
//! scale (100 = identical). `ratio` is a normalized Levenshtein
//! similarity; the partial and token variants build on it the way the
//! classic fuzzy-matching toolkits do: `partial_ratio` slides the shorter
//! string across the longer one, `token_sort_ratio` compares
//! alphabetically sorted token lists, and `token_set_ratio` compares the
//! token intersection against each side's remainder.

/// Normalized Levenshtein similarity between two strings (0-100).
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    ratio_chars(&a, &b)
}

/// Best `ratio` of the shorter string against every same-length window
/// of the longer string (0-100). Substring-aware: a short query inside a
/// long text scores high.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if shorter.is_empty() {
        return if longer.is_empty() { 100 } else { 0 };
    }
    if shorter.len() == longer.len() {
        return ratio_chars(shorter, longer);
    }

    let mut best = 0u8;
    for window in longer.windows(shorter.len()) {
        best = best.max(ratio_chars(shorter, window));
        if best == 100 {
            break;
        }
    }
    best
}

/// `ratio` of the two strings with their tokens lowercased and sorted
/// alphabetically first, so word order does not matter.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_token_string(a), &sorted_token_string(b))
}

/// Token-set similarity: splits both strings into token sets, then takes
/// the best `ratio` among {intersection vs intersection+rest-of-a,
/// intersection vs intersection+rest-of-b, the two combined forms}.
/// Robust to one side containing extra words.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    use std::collections::BTreeSet;

    let tokens_a: BTreeSet<String> = tokens(a).into_iter().collect();
    let tokens_b: BTreeSet<String> = tokens(b).into_iter().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let intersection: Vec<&str> = tokens_a
        .intersection(&tokens_b)
        .map(String::as_str)
        .collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).map(String::as_str).collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).map(String::as_str).collect();

    let base = intersection.join(" ");
    let combined_a = join_nonempty(&base, &only_a.join(" "));
    let combined_b = join_nonempty(&base, &only_b.join(" "));

    ratio(&base, &combined_a)
        .max(ratio(&base, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Levenshtein distance over char slices.
///
/// Single-row formulation to keep memory at O(min(len)).
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut previous_diagonal = row[0];
        row[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            let next = (row[j] + 1)
                .min(row[j + 1] + 1)
                .min(previous_diagonal + cost);
            previous_diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let distance = levenshtein(a, b);
    let max_len = a.len().max(b.len());
    let similarity = 1.0 - (distance as f64 / max_len as f64);
    (similarity * 100.0).round() as u8
}

/// Lowercased alphanumeric tokens of a string, in order of appearance.
fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn sorted_token_string(text: &str) -> String {
    let mut parts = tokens(text);
    parts.sort_unstable();
    parts.join(" ")
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{} {}", a, b),
    }
}
