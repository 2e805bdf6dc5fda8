//! Normalized Levenshtein similarity.

use crate::traits::StringSimilarity;

/// Scores titles by `1 - edit_distance / max(len)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LevenshteinMatcher;

impl LevenshteinMatcher {
    pub fn new() -> Self {
        Self
    }
}

/// Calculate the Levenshtein (edit) distance between two strings.
///
/// Returns the minimum number of single-character insertions, deletions or
/// substitutions required to change one string into the other.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rows instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

impl StringSimilarity for LevenshteinMatcher {
    fn name(&self) -> &str {
        "levenshtein"
    }

    fn similarity(&self, query: &str, candidate: &str) -> f64 {
        let longest = query.chars().count().max(candidate.chars().count());
        if longest == 0 {
            return 1.0;
        }
        1.0 - levenshtein_distance(query, candidate) as f64 / longest as f64
    }

    fn upper_bound(&self, query: &str, candidate: &str) -> f64 {
        // The distance is at least the length difference
        let (lq, lc) = (query.chars().count(), candidate.chars().count());
        let longest = lq.max(lc);
        if longest == 0 {
            return 1.0;
        }
        1.0 - lq.abs_diff(lc) as f64 / longest as f64
    }
}
