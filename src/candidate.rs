//! Classification of search results as live/bootleg recordings.

use crate::track::Track;
use serde::{Deserialize, Serialize};

/// Decides whether a search result looks like a live bootleg release.
///
/// A track qualifies only when both signals are present:
/// - the bootleg marker appears in its artist name or album name, and
/// - its title contains at least one of the live keywords.
///
/// All comparisons are case-insensitive.
///
/// ```rust
/// use live_swap::{CandidateFilter, Track};
///
/// let filter = CandidateFilter::default();
/// let track = Track {
///     id: "1".to_string(),
///     name: "Magenta Mountain (Live)".to_string(),
///     artist: "King Gizzard & the Lizard Wizard Bootlegs".to_string(),
///     album: "Live Bootlegs".to_string(),
///     uri: "spotify:track:1".to_string(),
/// };
/// assert!(filter.is_bootleg_candidate(&track));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilter {
    /// Substring that must appear in the artist or album name
    pub bootleg_marker: String,
    /// At least one of these must appear in the track title
    pub live_keywords: Vec<String>,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            bootleg_marker: "bootleg".to_string(),
            live_keywords: vec!["live".to_string(), "bootleg".to_string()],
        }
    }
}

impl CandidateFilter {
    pub fn new(bootleg_marker: impl Into<String>, live_keywords: Vec<String>) -> Self {
        Self {
            bootleg_marker: bootleg_marker.into(),
            live_keywords,
        }
    }

    /// Artist or album carries the bootleg marker.
    pub fn has_bootleg_metadata(&self, track: &Track) -> bool {
        let marker = self.bootleg_marker.to_lowercase();
        track.artist.to_lowercase().contains(&marker) || track.album.to_lowercase().contains(&marker)
    }

    /// Title mentions one of the live keywords.
    pub fn has_live_title(&self, track: &Track) -> bool {
        let name = track.name.to_lowercase();
        self.live_keywords
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    }

    pub fn is_bootleg_candidate(&self, track: &Track) -> bool {
        self.has_bootleg_metadata(track) && self.has_live_title(track)
    }
}
