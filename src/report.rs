//! Per-playlist and per-run results, as plain values for an outer layer to render.

use crate::swap::SwapOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwappedTrack {
    pub original: String,
    pub candidate: String,
    pub simulated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTrack {
    pub original: String,
    pub error: String,
    /// The original was removed but the replacement never landed
    pub partially_applied: bool,
}

/// Outcomes for one playlist, in position order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaylistReport {
    pub playlist: String,
    pub swapped: Vec<SwappedTrack>,
    pub not_found: Vec<String>,
    pub failed: Vec<FailedTrack>,
    /// Set when the playlist's entries could not be fetched
    pub error: Option<String>,
}

impl PlaylistReport {
    pub fn new(playlist: impl Into<String>) -> Self {
        Self {
            playlist: playlist.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: SwapOutcome) {
        match outcome {
            SwapOutcome::Swapped {
                original,
                candidate,
                simulated,
            } => self.swapped.push(SwappedTrack {
                original,
                candidate,
                simulated,
            }),
            SwapOutcome::NotFound { original } => self.not_found.push(original),
            SwapOutcome::Failed { original, error } => self.failed.push(FailedTrack {
                original,
                error,
                partially_applied: false,
            }),
            SwapOutcome::PartiallyApplied {
                original,
                candidate,
                error,
            } => self.failed.push(FailedTrack {
                original,
                error: format!("removed but '{candidate}' was not inserted: {error}"),
                partially_applied: true,
            }),
        }
    }

    /// Target-artist tracks seen in this playlist.
    pub fn target_tracks(&self) -> usize {
        self.swapped.len() + self.not_found.len() + self.failed.len()
    }

    pub fn partially_applied(&self) -> usize {
        self.failed.iter().filter(|f| f.partially_applied).count()
    }
}

/// Everything a run produced. Always built, even when every track failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub simulated: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Only playlists containing at least one target-artist track
    pub playlists: Vec<PlaylistReport>,
    pub total_target_tracks: usize,
    pub total_swapped: usize,
}

impl RunReport {
    pub fn new(simulated: bool) -> Self {
        Self {
            simulated,
            started_at: Utc::now(),
            finished_at: None,
            playlists: Vec::new(),
            total_target_tracks: 0,
            total_swapped: 0,
        }
    }

    /// Fold a playlist's results into the run. Playlists without target
    /// tracks are left out unless they could not be read at all.
    pub fn add_playlist(&mut self, report: PlaylistReport) {
        let seen = report.target_tracks();
        if seen == 0 && report.error.is_none() {
            return;
        }
        self.total_target_tracks += seen;
        self.total_swapped += report.swapped.len();
        self.playlists.push(report);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total_failed(&self) -> usize {
        self.playlists.iter().map(|p| p.failed.len()).sum()
    }

    pub fn total_partially_applied(&self) -> usize {
        self.playlists.iter().map(PlaylistReport::partially_applied).sum()
    }

    /// Swapped share of target tracks, as a percentage.
    pub fn match_rate(&self) -> Option<f64> {
        if self.total_target_tracks == 0 {
            return None;
        }
        Some(self.total_swapped as f64 / self.total_target_tracks as f64 * 100.0)
    }
}
