//! Choosing at most one live version for a studio title.

use crate::candidate::CandidateFilter;
use crate::exceptions::ExceptionList;
use crate::matcher::{is_strict_match, similarity, MatchThresholds};
use crate::normalize::normalize;
use crate::track::Track;

/// How a match was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPath {
    /// The top-ranked result passed the filter and the acceptance threshold.
    FastPath,
    /// A result further down passed the filter and the strict match.
    Strict,
}

/// Outcome of selecting a live version for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchDecision {
    NoMatch,
    Matched { candidate: Track, path: MatchPath },
}

impl MatchDecision {
    pub fn candidate(&self) -> Option<&Track> {
        match self {
            MatchDecision::Matched { candidate, .. } => Some(candidate),
            MatchDecision::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchDecision::Matched { .. })
    }
}

/// Applies the candidate filter, the matcher and the exception list to a
/// ranked result set.
///
/// Selection is pure: it looks only at its arguments and never calls out to
/// the catalog. The search happens earlier, in the runner.
///
/// # Examples
///
/// ```rust
/// use live_swap::{MatchPath, MatchDecision, Selector, Track};
///
/// let selector = Selector::default();
/// let results = vec![Track {
///     id: "1".to_string(),
///     name: "Magenta Mountain (Live)".to_string(),
///     artist: "King Gizzard & the Lizard Wizard Bootlegs".to_string(),
///     album: "Live Bootlegs".to_string(),
///     uri: "spotify:track:1".to_string(),
/// }];
///
/// match selector.select("Magenta Mountain", &results) {
///     MatchDecision::Matched { candidate, path } => {
///         assert_eq!(candidate.name, "Magenta Mountain (Live)");
///         assert_eq!(path, MatchPath::FastPath);
///     }
///     MatchDecision::NoMatch => panic!("expected a match"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Selector {
    filter: CandidateFilter,
    thresholds: MatchThresholds,
    exceptions: ExceptionList,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(
            CandidateFilter::default(),
            MatchThresholds::default(),
            ExceptionList::builtin(),
        )
    }
}

impl Selector {
    pub fn new(
        filter: CandidateFilter,
        thresholds: MatchThresholds,
        exceptions: ExceptionList,
    ) -> Self {
        Self {
            filter,
            thresholds,
            exceptions,
        }
    }

    /// Pick the live version of `original_title` from ranked `results`.
    ///
    /// 1. Empty results never match.
    /// 2. If the first result is a bootleg candidate whose similarity reaches
    ///    the acceptance threshold, it wins without the overlap check.
    /// 3. Otherwise the first result (in rank order) that is a bootleg
    ///    candidate and a strict match wins.
    /// 4. Whatever was chosen is dropped if the exception list vetoes it.
    pub fn select(&self, original_title: &str, results: &[Track]) -> MatchDecision {
        let decision = self.score(original_title, results);

        if let MatchDecision::Matched { candidate, .. } = &decision {
            if self.exceptions.is_vetoed(original_title, &candidate.name) {
                log::info!(
                    "Rejected '{}' for '{original_title}': listed exception",
                    candidate.name
                );
                return MatchDecision::NoMatch;
            }
        }

        decision
    }

    /// Decide for one title from the search results of a target-artist query.
    ///
    /// Results are logged at debug level, then passed to [`select`](Self::select).
    pub fn decide(&self, title: &str, results: &[Track]) -> MatchDecision {
        log::debug!("Deciding '{title}' against {} search results", results.len());
        self.select(title, results)
    }

    fn score(&self, original_title: &str, results: &[Track]) -> MatchDecision {
        let Some(first) = results.first() else {
            return MatchDecision::NoMatch;
        };

        if self.filter.is_bootleg_candidate(first) {
            let score = similarity(&normalize(original_title), &normalize(&first.name));
            log::debug!("Top search result '{}' score: {score}", first.name);
            if score >= self.thresholds.acceptance {
                return MatchDecision::Matched {
                    candidate: first.clone(),
                    path: MatchPath::FastPath,
                };
            }
            log::debug!("Top result '{}' rejected due to low score", first.name);
        }

        results
            .iter()
            .find(|track| {
                self.filter.is_bootleg_candidate(track)
                    && is_strict_match(original_title, &track.name, &self.thresholds)
            })
            .map(|track| {
                log::debug!("Accepted match: '{original_title}' -> '{}'", track.name);
                MatchDecision::Matched {
                    candidate: track.clone(),
                    path: MatchPath::Strict,
                }
            })
            .unwrap_or(MatchDecision::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exceptions::ExceptionRule;
    use crate::track::test_track;

    const BOOTLEG_ARTIST: &str = "King Gizzard & the Lizard Wizard Bootlegs";
    const STUDIO_ARTIST: &str = "King Gizzard & The Lizard Wizard";

    fn bootleg(name: &str) -> Track {
        test_track(name, BOOTLEG_ARTIST, "Live Bootlegs")
    }

    #[test]
    fn test_empty_results_never_match() {
        assert_eq!(
            Selector::default().select("The River", &[]),
            MatchDecision::NoMatch
        );
    }

    #[test]
    fn test_fast_path_accepts_top_result() {
        let results = vec![bootleg("Magenta Mountain (Live)")];
        let decision = Selector::default().select("Magenta Mountain", &results);
        assert_eq!(
            decision,
            MatchDecision::Matched {
                candidate: results[0].clone(),
                path: MatchPath::FastPath
            }
        );
    }

    #[test]
    fn test_fast_path_skips_overlap_check() {
        // every candidate word is in the original (similarity 100) but only
        // two of five original words are in the candidate
        let original = "Magenta Mountain Extended Jam Session";
        let top = bootleg("Magenta Mountain (Live)");
        let thresholds = MatchThresholds::default();
        assert!(!is_strict_match(original, &top.name, &thresholds));

        let decision = Selector::default().select(original, &[top.clone()]);
        assert_eq!(decision.candidate(), Some(&top));
    }

    #[test]
    fn test_fast_path_below_acceptance_falls_through() {
        let results = vec![bootleg("Nuclear Fusion (Live)"), bootleg("Work This Time (Live)")];
        assert_eq!(
            Selector::default().select("Sense", &results),
            MatchDecision::NoMatch
        );
    }

    #[test]
    fn test_exhaustive_fallback_finds_later_result() {
        let results = vec![
            test_track("Robot Stop", STUDIO_ARTIST, "Nonagon Infinity"),
            bootleg("Gamma Knife (Live in Brussels '19)"),
            bootleg("Robot Stop (Live at Levitation '22)"),
            bootleg("Robot Stop (Live in Adelaide '19)"),
        ];
        let decision = Selector::default().select("Robot Stop", &results);
        assert_eq!(
            decision,
            MatchDecision::Matched {
                candidate: results[2].clone(),
                path: MatchPath::Strict
            }
        );
    }

    #[test]
    fn test_non_candidates_are_never_selected() {
        let results = vec![
            test_track("Robot Stop (Live)", STUDIO_ARTIST, "Nonagon Infinity"),
            test_track("Robot Stop", BOOTLEG_ARTIST, "Live Bootlegs"),
        ];
        assert_eq!(
            Selector::default().select("Robot Stop", &results),
            MatchDecision::NoMatch
        );
    }

    #[test]
    fn test_exception_pair_vetoes_fast_path_match() {
        let original = "I'm Not a Man Unless I Have A Woman";
        let results = vec![bootleg("I'm Not in Your Mind (Live at Red Rocks '22)")];

        let permissive = MatchThresholds {
            acceptance: 0,
            ..MatchThresholds::default()
        };

        let unguarded = Selector::new(
            CandidateFilter::default(),
            permissive.clone(),
            ExceptionList::empty(),
        );
        assert!(unguarded.select(original, &results).is_match());

        let guarded = Selector::new(
            CandidateFilter::default(),
            permissive,
            ExceptionList::builtin(),
        );
        assert_eq!(guarded.select(original, &results), MatchDecision::NoMatch);
    }

    #[test]
    fn test_wildcard_vetoes_candidate_for_any_title() {
        let treaty = test_track(
            "King Gizzard & the Lizard Wizard W/King Stingray - Treaty (Live in Austin '24)",
            BOOTLEG_ARTIST,
            "Live in Austin '24",
        );
        for original in ["Treaty", "King Gizzard", "Lizard Wizard", "Stingray"] {
            assert_eq!(
                Selector::default().select(original, &[treaty.clone()]),
                MatchDecision::NoMatch,
                "wildcard did not veto for {original:?}"
            );
        }
    }

    #[test]
    fn test_veto_never_upgrades_no_match() {
        let selector = Selector::new(
            CandidateFilter::default(),
            MatchThresholds::default(),
            ExceptionList::new(vec![ExceptionRule::pair("Hot Water", "Hot Water (Live)")]),
        );
        let results = vec![test_track("Hot Water (Live)", STUDIO_ARTIST, "Studio")];
        assert_eq!(selector.select("Hot Water", &results), MatchDecision::NoMatch);
    }

    #[test]
    fn test_decide_agrees_with_select() {
        let selector = Selector::default();
        let results = vec![
            test_track("Robot Stop", STUDIO_ARTIST, "Nonagon Infinity"),
            bootleg("Robot Stop (Live in Adelaide '19)"),
        ];
        assert_eq!(
            selector.decide("Robot Stop", &results),
            selector.select("Robot Stop", &results)
        );
        assert!(selector.decide("Robot Stop", &results).is_match());
        assert_eq!(selector.decide("The River", &[]), MatchDecision::NoMatch);
    }

    #[test]
    fn test_select_is_deterministic() {
        let results = vec![
            bootleg("Crumbling Castle (Live)"),
            bootleg("Gila Monster (Live)"),
        ];
        let selector = Selector::default();
        let first = selector.select("Gila Monster", &results);
        for _ in 0..5 {
            assert_eq!(selector.select("Gila Monster", &results), first);
        }
    }
}
