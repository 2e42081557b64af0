//! Title canonicalization for comparison.
//!
//! Parenthesized segments such as `(Live at Red Rocks '22)` carry performance
//! metadata, not the song's identity, so they are dropped before anything
//! else happens.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Canonicalize a raw title.
///
/// Steps, in order: strip every `( ... )` segment, lowercase, drop anything
/// that is not an ASCII lowercase letter, digit or whitespace, then collapse
/// whitespace runs to single spaces and trim.
///
/// ```rust
/// use live_swap::normalize::normalize;
///
/// assert_eq!(normalize("Song Title (Live at Venue '24)"), "song title");
/// assert_eq!(normalize("  Rattlesnake!  "), "rattlesnake");
/// ```
pub fn normalize(title: &str) -> String {
    let stripped = PARENTHESIZED.replace_all(title, "");
    let cleaned: String = stripped
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a title into its set of normalized words.
///
/// Order and duplicates are discarded.
pub fn tokenize(title: &str) -> BTreeSet<String> {
    normalize(title)
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
