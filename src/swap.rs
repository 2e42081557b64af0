//! In-place replacement of one playlist slot.
//!
//! A swap removes the original track at a position and inserts the live
//! version at the same position, so every later slot keeps its index. There
//! are no retries and no rollback: a failed call is recorded against that one
//! track and processing moves on.

use crate::catalog::CatalogClient;
use crate::track::Track;
use serde::{Deserialize, Serialize};

/// Options threaded through a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOptions {
    /// Decide and report, but never call the mutation endpoints
    pub simulate: bool,
}

/// Result of processing one target-artist track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwapOutcome {
    /// The live version now occupies the slot (or would, when simulated).
    Swapped {
        original: String,
        candidate: String,
        simulated: bool,
    },
    /// No live version was selected; the playlist was not touched.
    NotFound { original: String },
    /// The removal failed; the playlist is unchanged.
    Failed { original: String, error: String },
    /// The original was removed but the live version could not be inserted.
    PartiallyApplied {
        original: String,
        candidate: String,
        error: String,
    },
}

impl SwapOutcome {
    /// Title of the studio track this outcome is about.
    pub fn original(&self) -> &str {
        match self {
            SwapOutcome::Swapped { original, .. }
            | SwapOutcome::NotFound { original }
            | SwapOutcome::Failed { original, .. }
            | SwapOutcome::PartiallyApplied { original, .. } => original,
        }
    }

    pub fn is_swapped(&self) -> bool {
        matches!(self, SwapOutcome::Swapped { .. })
    }

    /// Failed or partially applied.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SwapOutcome::Failed { .. } | SwapOutcome::PartiallyApplied { .. }
        )
    }
}

/// Replace `original` at `position` with `candidate`.
///
/// With `options.simulate` set, the client is never called and the outcome is
/// a simulated [`SwapOutcome::Swapped`]. Errors from either call are logged and
/// folded into the returned outcome; this function never fails.
pub async fn swap(
    client: &dyn CatalogClient,
    playlist_id: &str,
    position: usize,
    original: &Track,
    candidate: &Track,
    options: SwapOptions,
) -> SwapOutcome {
    log::info!(
        "Swapping '{}' at position {position} with '{}'",
        original.name,
        candidate.name
    );

    if options.simulate {
        log::info!("Simulation mode: swap not executed");
        return SwapOutcome::Swapped {
            original: original.name.clone(),
            candidate: candidate.name.clone(),
            simulated: true,
        };
    }

    if let Err(e) = client.remove_at(playlist_id, &original.uri, position).await {
        log::warn!(
            "Failed to remove '{}' at position {position} of playlist {playlist_id}: {e}",
            original.name
        );
        return SwapOutcome::Failed {
            original: original.name.clone(),
            error: e.to_string(),
        };
    }

    if let Err(e) = client.insert_at(playlist_id, &candidate.uri, position).await {
        log::warn!(
            "Removed '{}' but failed to insert '{}' at position {position} of playlist {playlist_id}: {e}",
            original.name,
            candidate.name
        );
        return SwapOutcome::PartiallyApplied {
            original: original.name.clone(),
            candidate: candidate.name.clone(),
            error: e.to_string(),
        };
    }

    SwapOutcome::Swapped {
        original: original.name.clone(),
        candidate: candidate.name.clone(),
        simulated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalogClient;
    use crate::track::test_track;
    use crate::LiveSwapError;
    use mockall::predicate::*;
    use mockall::Sequence;

    fn pair() -> (Track, Track) {
        (
            test_track("Rattlesnake", "King Gizzard & The Lizard Wizard", "Flying Microtonal Banana"),
            test_track(
                "Rattlesnake (Live at Red Rocks '22)",
                "King Gizzard & The Lizard Wizard Bootlegs",
                "Live at Red Rocks '22",
            ),
        )
    }

    #[tokio::test]
    async fn test_simulate_never_mutates() {
        let mut client = MockCatalogClient::new();
        client.expect_remove_at().never();
        client.expect_insert_at().never();

        let (original, candidate) = pair();
        let outcome = swap(
            &client,
            "pl1",
            3,
            &original,
            &candidate,
            SwapOptions { simulate: true },
        )
        .await;

        assert_eq!(
            outcome,
            SwapOutcome::Swapped {
                original: "Rattlesnake".to_string(),
                candidate: "Rattlesnake (Live at Red Rocks '22)".to_string(),
                simulated: true,
            }
        );
    }

    #[tokio::test]
    async fn test_remove_then_insert_at_same_position() {
        let (original, candidate) = pair();
        let mut client = MockCatalogClient::new();
        let mut seq = Sequence::new();

        client
            .expect_remove_at()
            .with(eq("pl1"), eq(original.uri.clone()), eq(3usize))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        client
            .expect_insert_at()
            .with(eq("pl1"), eq(candidate.uri.clone()), eq(3usize))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let outcome = swap(&client, "pl1", 3, &original, &candidate, SwapOptions::default()).await;
        assert!(outcome.is_swapped());
        assert_eq!(outcome.original(), "Rattlesnake");
    }

    #[tokio::test]
    async fn test_remove_failure_skips_insert() {
        let (original, candidate) = pair();
        let mut client = MockCatalogClient::new();
        client.expect_remove_at().times(1).returning(|_, _, _| {
            Err(LiveSwapError::Api {
                status: 403,
                message: "not the owner".to_string(),
            })
        });
        client.expect_insert_at().never();

        let outcome = swap(&client, "pl1", 0, &original, &candidate, SwapOptions::default()).await;
        assert_eq!(
            outcome,
            SwapOutcome::Failed {
                original: "Rattlesnake".to_string(),
                error: "API error (403): not the owner".to_string(),
            }
        );
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_insert_failure_is_partially_applied() {
        let (original, candidate) = pair();
        let mut client = MockCatalogClient::new();
        client.expect_remove_at().times(1).returning(|_, _, _| Ok(()));
        client
            .expect_insert_at()
            .times(1)
            .returning(|_, _, _| Err(LiveSwapError::Http("connection reset".to_string())));

        let outcome = swap(&client, "pl1", 0, &original, &candidate, SwapOptions::default()).await;
        assert!(matches!(outcome, SwapOutcome::PartiallyApplied { .. }));
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let outcome = SwapOutcome::NotFound {
            original: "The River".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["original"], "The River");
    }
}
