//! Run orchestration: playlists one at a time, slots in position order.

use crate::catalog::CatalogClient;
use crate::config::RunConfig;
use crate::report::{PlaylistReport, RunReport};
use crate::retry::search_with_retry;
use crate::selector::{MatchDecision, Selector};
use crate::swap::{swap, SwapOutcome};
use crate::{Playlist, PlaylistEntry, Result};
use log::{debug, info, warn};

/// Walks the user's playlists and replaces target-artist studio tracks with
/// live versions.
///
/// Processing is strictly sequential: one playlist at a time, and within a
/// playlist in ascending position order. A completed swap replaces its slot
/// in place, so positions fetched up front stay valid for the rest of the
/// pass. A partially applied swap removes a slot; every later position in
/// that playlist is shifted down by one to compensate.
///
/// # Examples
///
/// ```rust,no_run
/// use live_swap::{LiveSwapper, RunConfig, SpotifyClient};
///
/// # tokio_test::block_on(async {
/// let client = SpotifyClient::new(
///     Box::new(http_client::native::NativeClient::new()),
///     "access-token".to_string(),
/// );
/// let config = RunConfig {
///     simulate: true,
///     ..RunConfig::default()
/// };
/// let swapper = LiveSwapper::new(&client, config)?;
/// let report = swapper.run().await?;
/// println!("Swapped {} of {} tracks", report.total_swapped, report.total_target_tracks);
/// # Ok::<(), live_swap::LiveSwapError>(())
/// # });
/// ```
pub struct LiveSwapper<'a> {
    client: &'a dyn CatalogClient,
    selector: Selector,
    config: RunConfig,
}

impl<'a> LiveSwapper<'a> {
    /// Build a swapper, loading the exception list named by `config`.
    pub fn new(client: &'a dyn CatalogClient, config: RunConfig) -> Result<Self> {
        let selector = config.build_selector()?;
        Ok(Self::with_selector(client, selector, config))
    }

    pub fn with_selector(client: &'a dyn CatalogClient, selector: Selector, config: RunConfig) -> Self {
        Self {
            client,
            selector,
            config,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Process every playlist of the current user.
    ///
    /// Fails only if the playlist listing itself cannot be fetched; every
    /// later failure is recorded in the report.
    pub async fn run(&self) -> Result<RunReport> {
        info!("Fetching user playlists...");
        let playlists = self.client.current_user_playlists().await?;
        info!("Found {} playlists", playlists.len());

        let mut report = RunReport::new(self.config.simulate);
        for playlist in &playlists {
            report.add_playlist(self.process_playlist(playlist).await);
        }
        report.finish();

        info!(
            "Run complete: {} of {} target tracks swapped",
            report.total_swapped, report.total_target_tracks
        );
        Ok(report)
    }

    /// Process one playlist, in ascending position order.
    pub async fn process_playlist(&self, playlist: &Playlist) -> PlaylistReport {
        info!("Processing playlist '{}'", playlist.name);
        let mut report = PlaylistReport::new(&playlist.name);

        let mut entries = match self.client.playlist_entries(&playlist.id).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to fetch tracks of playlist '{}': {e}", playlist.name);
                report.error = Some(e.to_string());
                return report;
            }
        };
        entries.sort_by_key(|entry| entry.position);

        // slots removed by partially applied swaps earlier in this pass
        let mut removed = 0;
        for entry in &entries {
            let position = entry.position.saturating_sub(removed);
            if let Some(outcome) = self.process_entry_at(&playlist.id, entry, position).await {
                if matches!(outcome, SwapOutcome::PartiallyApplied { .. }) {
                    removed += 1;
                }
                report.record(outcome);
            }
        }

        report
    }

    /// Decide and execute for one slot. `None` means the slot was skipped
    /// (empty or not by the target artist).
    pub async fn process_entry(&self, playlist_id: &str, entry: &PlaylistEntry) -> Option<SwapOutcome> {
        self.process_entry_at(playlist_id, entry, entry.position).await
    }

    /// Like [`process_entry`](Self::process_entry), but mutating the slot at
    /// `position`, the entry's current index in the live playlist.
    pub async fn process_entry_at(
        &self,
        playlist_id: &str,
        entry: &PlaylistEntry,
        position: usize,
    ) -> Option<SwapOutcome> {
        let Some(track) = &entry.track else {
            debug!("Skipping position {}: no track", entry.position);
            return None;
        };

        if !self.config.is_target_artist(&track.artist) {
            return None;
        }

        let outcome = match self.find_live_version(&track.name).await {
            MatchDecision::Matched { candidate, path } => {
                debug!("Selected '{}' via {path:?}", candidate.name);
                swap(
                    self.client,
                    playlist_id,
                    position,
                    track,
                    &candidate,
                    self.config.swap_options(),
                )
                .await
            }
            MatchDecision::NoMatch => {
                info!("No bootleg match found for '{}'", track.name);
                SwapOutcome::NotFound {
                    original: track.name.clone(),
                }
            }
        };

        Some(outcome)
    }

    /// Search for `title` and select at most one live version.
    pub async fn find_live_version(&self, title: &str) -> MatchDecision {
        let query = self.config.search_query(title);
        let results = search_with_retry(
            self.client,
            &query,
            self.config.search_limit,
            &self.config.retry,
        )
        .await;
        self.selector.decide(title, &results)
    }
}
