//! [`CatalogClient`] over the Spotify Web API.
//!
//! Token acquisition is not handled here: the client is constructed with an
//! already-authorized bearer token carrying the `playlist-read-private`,
//! `playlist-modify-private` and `playlist-modify-public` scopes.

use crate::catalog::CatalogClient;
use crate::{LiveSwapError, Playlist, PlaylistEntry, Result, SearchResultSet, Track};
use async_trait::async_trait;
use http_client::{HttpClient, Request, Response};
use http_types::{Method, Url};
use serde::Deserialize;

const PLAYLIST_PAGE_SIZE: u32 = 50;
const PLAYLIST_TRACKS_PAGE_SIZE: u32 = 100;

/// Spotify Web API client.
///
/// # Examples
///
/// ```rust,no_run
/// use live_swap::{CatalogClient, SpotifyClient};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let client = SpotifyClient::new(Box::new(http_client), "access-token".to_string());
///
/// let results = client
///     .search_tracks("Rattlesnake King Gizzard & The Lizard Wizard live", 20)
///     .await?;
/// for track in results {
///     println!("{track}");
/// }
/// # Ok::<(), live_swap::LiveSwapError>(())
/// # });
/// ```
pub struct SpotifyClient {
    client: Box<dyn HttpClient>,
    access_token: String,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(client: Box<dyn HttpClient>, access_token: String) -> Self {
        Self::with_base_url(client, access_token, "https://api.spotify.com/v1".to_string())
    }

    /// Create a client against a custom API root (e.g. a local stub server).
    pub fn with_base_url(client: Box<dyn HttpClient>, access_token: String, base_url: String) -> Self {
        Self {
            client,
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn parse_url(url: &str) -> Result<Url> {
        url.parse::<Url>()
            .map_err(|e| LiveSwapError::Parse(format!("Invalid URL '{url}': {e}")))
    }

    async fn send(&self, method: Method, url: &str, body: Option<serde_json::Value>) -> Result<String> {
        let mut request = Request::new(method, Self::parse_url(url)?);
        let auth = format!("Bearer {}", self.access_token);
        request.insert_header("Authorization", auth.as_str());
        request.insert_header("Accept", "application/json");
        if let Some(body) = body {
            request.insert_header("Content-Type", "application/json");
            request.set_body(body.to_string());
        }

        log::debug!("{method} {url}");
        let mut response: Response = self
            .client
            .send(request)
            .await
            .map_err(|e| LiveSwapError::Http(e.to_string()))?;

        let status = response.status();
        let content = response
            .body_string()
            .await
            .map_err(|e| LiveSwapError::Http(e.to_string()))?;

        log::debug!("{method} {url}: {status}, {} chars", content.len());
        check_status(u16::from(status), &content)?;
        Ok(content)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let content = self.send(Method::Get, url, None).await?;
        serde_json::from_str(&content).map_err(|e| LiveSwapError::Parse(e.to_string()))
    }
}

/// Map an HTTP status to the error taxonomy. Throttling and server errors
/// are transport failures; other non-2xx statuses are refusals.
fn check_status(status: u16, body: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        429 | 500..=599 => Err(LiveSwapError::Http(format!(
            "status {status}: {}",
            error_message(body)
        ))),
        _ => Err(LiveSwapError::Api {
            status,
            message: error_message(body),
        }),
    }
}

fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect())
}

#[derive(Debug, Deserialize)]
struct Paging<T> {
    items: Vec<T>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Paging<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    #[serde(default)]
    id: Option<String>,
    name: String,
    uri: String,
    #[serde(default)]
    artists: Vec<NamedObject>,
    #[serde(default)]
    album: Option<NamedObject>,
}

#[derive(Debug, Deserialize)]
struct NamedObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistObject {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    track: Option<TrackObject>,
}

impl From<TrackObject> for Track {
    fn from(track: TrackObject) -> Self {
        Track {
            id: track.id.unwrap_or_default(),
            name: track.name,
            artist: track
                .artists
                .into_iter()
                .next()
                .map(|artist| artist.name)
                .unwrap_or_default(),
            album: track.album.map(|album| album.name).unwrap_or_default(),
            uri: track.uri,
        }
    }
}

fn entries_from_items(items: Vec<PlaylistItem>, first_position: usize) -> Vec<PlaylistEntry> {
    items
        .into_iter()
        .enumerate()
        .map(|(offset, item)| PlaylistEntry {
            position: first_position + offset,
            track: item.track.map(Track::from),
        })
        .collect()
}

#[async_trait(?Send)]
impl CatalogClient for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<SearchResultSet> {
        let url = format!(
            "{}/search?q={}&type=track&limit={limit}",
            self.base_url,
            urlencoding::encode(query)
        );
        let response: SearchResponse = self.get_json(&url).await?;
        Ok(response.tracks.items.into_iter().map(Track::from).collect())
    }

    async fn remove_at(&self, playlist_id: &str, track_uri: &str, position: usize) -> Result<()> {
        let url = format!("{}/playlists/{playlist_id}/tracks", self.base_url);
        let body = serde_json::json!({
            "tracks": [{ "uri": track_uri, "positions": [position] }]
        });
        self.send(Method::Delete, &url, Some(body)).await?;
        Ok(())
    }

    async fn insert_at(&self, playlist_id: &str, track_uri: &str, position: usize) -> Result<()> {
        let url = format!("{}/playlists/{playlist_id}/tracks", self.base_url);
        let body = serde_json::json!({ "uris": [track_uri], "position": position });
        self.send(Method::Post, &url, Some(body)).await?;
        Ok(())
    }

    async fn current_user_playlists(&self) -> Result<Vec<Playlist>> {
        let mut playlists = Vec::new();
        let mut next = Some(format!(
            "{}/me/playlists?limit={PLAYLIST_PAGE_SIZE}",
            self.base_url
        ));

        while let Some(url) = next {
            let page: Paging<PlaylistObject> = self.get_json(&url).await?;
            playlists.extend(page.items.into_iter().map(|p| Playlist {
                id: p.id,
                name: p.name,
            }));
            next = page.next;
        }

        Ok(playlists)
    }

    async fn playlist_entries(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(format!(
            "{}/playlists/{playlist_id}/tracks?limit={PLAYLIST_TRACKS_PAGE_SIZE}",
            self.base_url
        ));

        while let Some(url) = next {
            let page: Paging<PlaylistItem> = self.get_json(&url).await?;
            let first_position = entries.len();
            entries.extend(entries_from_items(page.items, first_position));
            next = page.next;
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_to_tracks() {
        let json = r#"{
            "tracks": {
                "items": [{
                    "id": "abc",
                    "name": "Magenta Mountain (Live)",
                    "uri": "spotify:track:abc",
                    "artists": [
                        {"name": "King Gizzard & the Lizard Wizard Bootlegs"},
                        {"name": "Someone Else"}
                    ],
                    "album": {"name": "Live Bootlegs"}
                }],
                "next": null
            }
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let tracks: Vec<Track> = response.tracks.items.into_iter().map(Track::from).collect();

        assert_eq!(
            tracks,
            vec![Track {
                id: "abc".to_string(),
                name: "Magenta Mountain (Live)".to_string(),
                artist: "King Gizzard & the Lizard Wizard Bootlegs".to_string(),
                album: "Live Bootlegs".to_string(),
                uri: "spotify:track:abc".to_string(),
            }]
        );
    }

    #[test]
    fn test_playlist_items_keep_positions_for_missing_tracks() {
        let json = r#"{
            "items": [
                {"track": {"id": "1", "name": "Robot Stop", "uri": "spotify:track:1",
                           "artists": [{"name": "King Gizzard & The Lizard Wizard"}],
                           "album": {"name": "Nonagon Infinity"}}},
                {"track": null},
                {"track": {"id": null, "name": "local file", "uri": "spotify:local:::x:1"}}
            ],
            "next": "https://api.spotify.com/v1/playlists/p/tracks?offset=100&limit=100"
        }"#;
        let page: Paging<PlaylistItem> = serde_json::from_str(json).unwrap();
        assert!(page.next.is_some());

        let entries = entries_from_items(page.items, 100);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].position, 100);
        assert_eq!(entries[0].track.as_ref().unwrap().artist, "King Gizzard & The Lizard Wizard");
        assert!(entries[1].track.is_none());
        assert_eq!(entries[2].position, 102);
        assert_eq!(entries[2].track.as_ref().unwrap().album, "");
    }

    #[test]
    fn test_status_mapping() {
        assert!(check_status(200, "").is_ok());
        assert!(check_status(201, "{}").is_ok());

        let throttled = check_status(429, "").unwrap_err();
        assert!(throttled.is_transport());
        assert!(check_status(503, "").unwrap_err().is_transport());

        match check_status(
            403,
            r#"{"error": {"status": 403, "message": "You cannot modify this playlist"}}"#,
        ) {
            Err(LiveSwapError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "You cannot modify this playlist");
            }
            other => panic!("Expected API error, got: {other:?}"),
        }
    }
}
