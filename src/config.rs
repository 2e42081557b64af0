//! Run settings, loaded from an optional JSON file on top of built-in defaults.

use crate::candidate::CandidateFilter;
use crate::exceptions::ExceptionList;
use crate::matcher::MatchThresholds;
use crate::retry::RetryConfig;
use crate::selector::Selector;
use crate::swap::SwapOptions;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one run.
///
/// Every field has a default, so a JSON settings file only needs the keys it
/// changes:
///
/// ```rust
/// use live_swap::RunConfig;
///
/// let config = RunConfig::from_json_str(r#"{"search_limit": 50, "simulate": true}"#).unwrap();
/// assert_eq!(config.search_limit, 50);
/// assert!(config.simulate);
/// assert_eq!(config.target_artist, "King Gizzard & The Lizard Wizard");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Artist whose studio tracks are replaced
    pub target_artist: String,
    pub filter: CandidateFilter,
    pub thresholds: MatchThresholds,
    /// Number of ranked results requested per search
    pub search_limit: u32,
    pub retry: RetryConfig,
    pub simulate: bool,
    /// JSON exception list; the built-in table is used when unset
    pub exceptions_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_artist: "King Gizzard & The Lizard Wizard".to_string(),
            filter: CandidateFilter::default(),
            thresholds: MatchThresholds::default(),
            search_limit: 20,
            retry: RetryConfig::default(),
            simulate: false,
            exceptions_path: None,
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        log::debug!("Reading settings from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Default location of the user's exception list:
    /// `~/.config/live-swap/exceptions.json` on Linux.
    pub fn default_exceptions_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("live-swap").join("exceptions.json"))
    }

    pub fn swap_options(&self) -> SwapOptions {
        SwapOptions {
            simulate: self.simulate,
        }
    }

    /// The exception list for this run.
    ///
    /// An explicit path must load. Otherwise the default path is used if the
    /// file exists, falling back to [`ExceptionList::builtin`].
    pub fn load_exceptions(&self) -> Result<ExceptionList> {
        if let Some(path) = &self.exceptions_path {
            return ExceptionList::from_json_file(path);
        }

        match Self::default_exceptions_path() {
            Some(path) if path.exists() => ExceptionList::from_json_file(&path),
            _ => Ok(ExceptionList::builtin()),
        }
    }

    pub fn build_selector(&self) -> Result<Selector> {
        Ok(Selector::new(
            self.filter.clone(),
            self.thresholds.clone(),
            self.load_exceptions()?,
        ))
    }

    /// Query sent to the catalog for one studio title.
    pub fn search_query(&self, title: &str) -> String {
        format!("{title} {} live", self.target_artist)
    }

    /// Whether a track's primary artist is the target artist.
    pub fn is_target_artist(&self, artist: &str) -> bool {
        artist
            .to_lowercase()
            .contains(&self.target_artist.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LiveSwapError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.thresholds.acceptance, 60);
        assert_eq!(config.thresholds.strict, 85);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.filter.live_keywords, vec!["live", "bootleg"]);
        assert!(!config.swap_options().simulate);
    }

    #[test]
    fn test_search_query() {
        let config = RunConfig::default();
        assert_eq!(
            config.search_query("Magenta Mountain"),
            "Magenta Mountain King Gizzard & The Lizard Wizard live"
        );
    }

    #[test]
    fn test_target_artist_is_case_insensitive_substring() {
        let config = RunConfig::default();
        assert!(config.is_target_artist("King Gizzard & the Lizard Wizard"));
        assert!(config.is_target_artist("KING GIZZARD & THE LIZARD WIZARD"));
        assert!(!config.is_target_artist("King Stingray"));
    }

    #[test]
    fn test_nested_partial_settings() {
        let config =
            RunConfig::from_json_str(r#"{"thresholds": {"strict": 90}, "retry": {"delay_secs": 0}}"#)
                .unwrap();
        assert_eq!(config.thresholds.strict, 90);
        assert_eq!(config.thresholds.acceptance, 60);
        assert_eq!(config.retry.delay_secs, 0);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_explicit_exceptions_path_must_load() {
        let config = RunConfig {
            exceptions_path: Some(PathBuf::from("/nonexistent/live-swap/exceptions.json")),
            ..RunConfig::default()
        };
        assert!(matches!(config.load_exceptions(), Err(LiveSwapError::Io(_))));
    }

    #[test]
    fn test_malformed_settings_is_json_error() {
        assert!(matches!(
            RunConfig::from_json_str(r#"{"search_limit": "many"}"#),
            Err(LiveSwapError::Json(_))
        ));
    }

    #[test]
    fn test_exceptions_from_file() {
        let path = std::env::temp_dir().join(format!(
            "live-swap-exceptions-{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"[{{"original": "Hot Water", "candidate": "Hot Wax (Live)"}}]"#).unwrap();

        let config = RunConfig {
            exceptions_path: Some(path.clone()),
            ..RunConfig::default()
        };
        let list = config.load_exceptions().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(list.len(), 1);
        assert!(list.is_vetoed("Hot Water", "Hot Wax (Live)"));
    }
}
