//! Hard-coded vetoes for known mis-matches.
//!
//! Some candidates pass scoring and are still the wrong song (a different
//! track sharing vocabulary, a collaboration with another band). Rules here
//! can only turn a match into a non-match, never the other way round.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single veto rule.
///
/// With `candidate: Some(..)` the exact `(original, candidate)` pair is
/// rejected. With `candidate: None` the rule is a wildcard: `original` names a
/// title that must never be swapped in, from any source title, and is never
/// itself swapped out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRule {
    pub original: String,
    #[serde(default)]
    pub candidate: Option<String>,
}

impl ExceptionRule {
    pub fn pair(original: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            candidate: Some(candidate.into()),
        }
    }

    pub fn wildcard(title: impl Into<String>) -> Self {
        Self {
            original: title.into(),
            candidate: None,
        }
    }

    fn rejects(&self, original: &str, candidate: &str) -> bool {
        match &self.candidate {
            Some(listed) => self.original == original && listed == candidate,
            None => self.original == original || self.original == candidate,
        }
    }
}

/// The table of veto rules consulted by the selector after a match is found.
///
/// Titles are compared exactly, without normalization.
///
/// # Examples
///
/// ```rust
/// use live_swap::{ExceptionList, ExceptionRule};
///
/// let list = ExceptionList::new(vec![
///     ExceptionRule::pair("Hot Water", "Hot Wax (Live)"),
///     ExceptionRule::wildcard("Somebody Else - Jam (Live)"),
/// ]);
///
/// assert!(list.is_vetoed("Hot Water", "Hot Wax (Live)"));
/// assert!(list.is_vetoed("Anything", "Somebody Else - Jam (Live)"));
/// assert!(!list.is_vetoed("Hot Water", "Hot Water (Live)"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExceptionList {
    rules: Vec<ExceptionRule>,
}

impl ExceptionList {
    pub fn new(rules: Vec<ExceptionRule>) -> Self {
        Self { rules }
    }

    /// An empty list that vetoes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rules for known King Gizzard mis-matches.
    pub fn builtin() -> Self {
        Self::new(vec![
            ExceptionRule::pair(
                "I'm Not a Man Unless I Have A Woman",
                "I'm Not in Your Mind (Live at Red Rocks '22)",
            ),
            // catalog titles use a typographic apostrophe
            ExceptionRule::pair(
                "I\u{2019}m Not a Man Unless I Have A Woman",
                "I'm Not in Your Mind (Live at Red Rocks '22)",
            ),
            ExceptionRule::wildcard(
                "King Gizzard & the Lizard Wizard W/King Stingray - Treaty (Live in Austin '24)",
            ),
        ])
    }

    /// Parse rules from a JSON array of `{"original": .., "candidate": ..}` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: Vec<ExceptionRule> = serde_json::from_str(json)?;
        Ok(Self::new(rules))
    }

    /// Load rules from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        log::debug!("Reading exception list from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let list = Self::from_json_str(&contents)?;
        log::debug!(
            "Loaded {} exception rules from {}",
            list.len(),
            path.display()
        );
        Ok(list)
    }

    pub fn rules(&self) -> &[ExceptionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether swapping `original` for `candidate` is explicitly forbidden.
    pub fn is_vetoed(&self, original: &str, candidate: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.rejects(original, candidate))
    }
}
