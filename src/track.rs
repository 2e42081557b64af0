//! Catalog and playlist data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A track as returned by the catalog.
///
/// Tracks are never mutated once fetched. A swap changes which tracks a
/// playlist contains; it does not produce modified `Track` values. Identity is
/// the [`uri`](Track::uri).
///
/// # Examples
///
/// ```rust
/// use live_swap::Track;
///
/// let track = Track {
///     id: "4uLU6hMCjMI75M1A2tKUQC".to_string(),
///     name: "Magenta Mountain".to_string(),
///     artist: "King Gizzard & The Lizard Wizard".to_string(),
///     album: "Butterfly 3000".to_string(),
///     uri: "spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string(),
/// };
///
/// assert_eq!(
///     format!("{track}"),
///     "King Gizzard & The Lizard Wizard - Magenta Mountain [Butterfly 3000]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier
    pub id: String,
    /// The track name/title
    pub name: String,
    /// Primary artist name
    pub artist: String,
    /// Album name
    pub album: String,
    /// Opaque identifier passed to playlist mutation calls
    pub uri: String,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.album.is_empty() {
            write!(f, "{} - {}", self.artist, self.name)
        } else {
            write!(f, "{} - {} [{}]", self.artist, self.name, self.album)
        }
    }
}

/// Ranked search results; order is significant.
pub type SearchResultSet = Vec<Track>;

/// A playlist owned (or followed) by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

/// One slot of a playlist.
///
/// `track` is `None` for entries the catalog can no longer resolve (local
/// files, removed releases). Those slots still occupy a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub position: usize,
    pub track: Option<Track>,
}

#[cfg(test)]
pub(crate) fn test_track(name: &str, artist: &str, album: &str) -> Track {
    let slug: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    Track {
        id: slug.clone(),
        name: name.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        uri: format!("spotify:track:{slug}"),
    }
}
