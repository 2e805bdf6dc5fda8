//! Ratcliff/Obershelp ("gestalt") pattern matching.
//!
//! ## Algorithm
//! 1. Find the longest block of characters common to both strings
//!    (earliest in the candidate, then earliest in the query, on ties)
//! 2. Recurse on the pieces left and right of that block
//! 3. `ratio = 2 * M / (len(a) + len(b))`, where M is the total size of all
//!    blocks found
//!
//! Strings are compared as sequences of Unicode scalar values. When the
//! second string has 200 or more characters, characters making up more
//! than 1% of it are "popular": they can't start a block, only extend one.

use crate::traits::StringSimilarity;
use std::collections::HashMap;

/// Gestalt pattern matcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct GestaltMatcher;

impl GestaltMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Full Ratcliff/Obershelp ratio of `a` against `b`.
    pub fn ratio(a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        ratio_of(matching_characters(&a, &b), a.len() + b.len())
    }

    /// Upper bound on `ratio` from the multiset of shared characters.
    pub fn quick_ratio(a: &str, b: &str) -> f64 {
        let mut available: HashMap<char, usize> = HashMap::new();
        for c in b.chars() {
            *available.entry(c).or_insert(0) += 1;
        }
        let mut matches = 0;
        let mut len_a = 0;
        for c in a.chars() {
            len_a += 1;
            if let Some(count) = available.get_mut(&c) {
                if *count > 0 {
                    *count -= 1;
                    matches += 1;
                }
            }
        }
        let len_b: usize = available.values().sum::<usize>() + matches;
        ratio_of(matches, len_a + len_b)
    }

    /// Very cheap upper bound on `ratio` from the lengths alone.
    pub fn real_quick_ratio(a: &str, b: &str) -> f64 {
        let (la, lb) = (a.chars().count(), b.chars().count());
        ratio_of(la.min(lb), la + lb)
    }
}

impl StringSimilarity for GestaltMatcher {
    fn name(&self) -> &str {
        "gestalt"
    }

    fn similarity(&self, query: &str, candidate: &str) -> f64 {
        GestaltMatcher::ratio(candidate, query)
    }

    fn upper_bound(&self, query: &str, candidate: &str) -> f64 {
        let cheap = GestaltMatcher::real_quick_ratio(candidate, query);
        if cheap == 0.0 {
            return cheap;
        }
        cheap.min(GestaltMatcher::quick_ratio(candidate, query))
    }
}

fn ratio_of(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}

/// Sequences shorter than this have no popular characters
const POPULAR_MIN_LEN: usize = 200;

/// Total size of the matching blocks of `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        positions.entry(c).or_default().push(j);
    }
    if b.len() >= POPULAR_MIN_LEN {
        let threshold = b.len() / 100 + 1;
        positions.retain(|_, js| js.len() <= threshold);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, &positions, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// `positions` only indexes non-popular characters of `b`; popular ones are
/// picked up by extending the best block in both directions.
fn longest_match(
    a: &[char],
    b: &[char],
    positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    // Length of the match ending at (i - 1, j), keyed by j
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_lengths = HashMap::new();
        if let Some(js) = positions.get(c) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let len = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_lengths.insert(j, len);
                if len > best_len {
                    best_i = i + 1 - len;
                    best_j = j + 1 - len;
                    best_len = len;
                }
            }
        }
        run_lengths = next_lengths;
    }

    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_len += 1;
    }
    while best_i + best_len < ahi && best_j + best_len < bhi && a[best_i + best_len] == b[best_j + best_len] {
        best_len += 1;
    }
    (best_i, best_j, best_len)
}
