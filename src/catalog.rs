use crate::{Playlist, PlaylistEntry, Result, SearchResultSet};
use async_trait::async_trait;

/// Remote catalog and playlist operations the swap engine depends on.
///
/// The engine never talks to a service directly; it only needs track search
/// and the two position-addressed playlist mutations, plus enough listing to
/// walk the user's playlists. Implementations own transport concerns
/// (authentication, timeouts, connection reuse).
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockCatalogClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait(?Send)]
pub trait CatalogClient {
    /// Search tracks, ranked by the service. Transport failures come back as
    /// [`LiveSwapError::Http`](crate::LiveSwapError::Http).
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<SearchResultSet>;

    /// Remove the occurrence of `track_uri` at `position`.
    async fn remove_at(&self, playlist_id: &str, track_uri: &str, position: usize) -> Result<()>;

    /// Insert `track_uri` so that it ends up at `position`.
    async fn insert_at(&self, playlist_id: &str, track_uri: &str, position: usize) -> Result<()>;

    /// Playlists of the current user.
    async fn current_user_playlists(&self) -> Result<Vec<Playlist>>;

    /// Every entry of a playlist, in position order.
    async fn playlist_entries(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>>;
}
