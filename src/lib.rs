//! Replace studio tracks in playlists with live bootleg recordings of the
//! same song.
//!
//! For each playlist slot holding a track by the target artist, the catalog
//! is searched for live versions, at most one is selected by
//! [`Selector::select`], and [`swap`] replaces the slot in place.
//! Everything accumulates into a [`RunReport`].

pub mod candidate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod exceptions;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod retry;
pub mod runner;
pub mod selector;
pub mod spotify;
pub mod swap;
pub mod track;

pub use candidate::CandidateFilter;
pub use catalog::CatalogClient;
pub use config::RunConfig;
pub use error::LiveSwapError;
pub use exceptions::{ExceptionList, ExceptionRule};
pub use matcher::{is_strict_match, similarity, MatchThresholds};
pub use report::{FailedTrack, PlaylistReport, RunReport, SwappedTrack};
pub use retry::RetryConfig;
pub use runner::LiveSwapper;
pub use selector::{MatchDecision, MatchPath, Selector};
pub use spotify::SpotifyClient;
pub use swap::{swap, SwapOptions, SwapOutcome};
pub use track::{Playlist, PlaylistEntry, SearchResultSet, Track};

#[cfg(feature = "mock")]
pub use catalog::MockCatalogClient;

pub type Result<T> = std::result::Result<T, LiveSwapError>;
