//! Title similarity scoring.
//!
//! [`similarity`] is a token-set ratio: both titles are split into word sets,
//! and the score is the best indel ratio among the sorted intersection, the
//! intersection plus each side's leftover words, and the two leftovers
//! against each other. It ignores word order and duplicates and scores 100
//! whenever one title's words are a subset of the other's. The acceptance
//! thresholds in [`MatchThresholds`] are tuned against exactly this metric.

use crate::normalize::{normalize, tokenize};
use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Score thresholds used by the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Minimum similarity for the top-ranked result on the fast path
    pub acceptance: u8,
    /// Minimum similarity for a strict match
    pub strict: u8,
    /// Minimum share of the original title's words the candidate must contain
    pub min_overlap: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            acceptance: 60,
            strict: 85,
            min_overlap: 0.8,
        }
    }
}

/// Token-set similarity between two titles, in `0..=100`.
///
/// The inputs are split on whitespace as given; callers normalize first.
/// The fractional score is floored, so `similarity(a, b) >= t` holds exactly
/// when the unrounded score reaches an integer threshold `t`.
///
/// ```rust
/// use live_swap::matcher::similarity;
///
/// assert_eq!(similarity("magenta mountain", "magenta mountain live"), 100);
/// assert!(similarity("robot stop", "gamma knife") < 60);
/// ```
pub fn similarity(a: &str, b: &str) -> u8 {
    token_set_ratio(a, b).floor() as u8
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    // BTreeSet iteration is already sorted
    let diff_ab_joined = diff_ab.join(" ");
    let diff_ba_joined = diff_ba.join(" ");
    let ab_len = diff_ab_joined.chars().count();
    let ba_len = diff_ba_joined.chars().count();
    let sect_len = intersection.join(" ").chars().count();

    let separator = usize::from(sect_len != 0);
    let sect_ab_len = sect_len + separator + ab_len;
    let sect_ba_len = sect_len + separator + ba_len;

    let dist = indel::distance(diff_ab_joined.chars(), diff_ba_joined.chars());
    let result = norm_distance(dist, sect_ab_len + sect_ba_len);

    if sect_len == 0 {
        return result;
    }

    // "sect" vs "sect ab" only differs by the appended words
    let sect_ab_ratio = norm_distance(separator + ab_len, sect_len + sect_ab_len);
    let sect_ba_ratio = norm_distance(separator + ba_len, sect_len + sect_ba_len);

    result.max(sect_ab_ratio).max(sect_ba_ratio)
}

fn norm_distance(dist: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 100.0;
    }
    100.0 - 100.0 * dist as f64 / lensum as f64
}

/// Share of `original`'s words that also appear in `candidate`.
///
/// Zero when the original has no words.
pub fn token_overlap(original: &BTreeSet<String>, candidate: &BTreeSet<String>) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    original.intersection(candidate).count() as f64 / original.len() as f64
}

/// Strict match: similarity of the normalized titles reaches `thresholds.strict`
/// and the candidate contains at least `thresholds.min_overlap` of the
/// original's words.
///
/// This is the check applied to every ranked candidate, so it is stricter
/// than the fast-path acceptance threshold.
pub fn is_strict_match(original: &str, candidate: &str, thresholds: &MatchThresholds) -> bool {
    let score = similarity(&normalize(original), &normalize(candidate));
    if score < thresholds.strict {
        return false;
    }

    let original_words = tokenize(original);
    let candidate_words = tokenize(candidate);
    let ratio = token_overlap(&original_words, &candidate_words);

    log::debug!(
        "Match check '{original}' <-> '{candidate}': score={score}, overlap={:?}, ratio={ratio:.2}",
        original_words
            .intersection(&candidate_words)
            .collect::<Vec<_>>()
    );

    ratio >= thresholds.min_overlap
}
