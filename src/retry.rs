use crate::catalog::CatalogClient;
use crate::{LiveSwapError, Result, SearchResultSet};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Fixed pause between attempts (in seconds)
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 2,
        }
    }
}

/// Result of a retry operation with context
#[derive(Debug)]
pub struct RetryResult<T> {
    /// The successful result
    pub result: T,
    /// Number of failed attempts before the successful one
    pub attempts_made: u32,
}

/// Execute an async operation, retrying transport failures with a fixed backoff.
///
/// Only errors for which [`LiveSwapError::is_transport`] holds are retried; any
/// other error is returned immediately. After `max_attempts` transport failures
/// the last error is returned.
///
/// # Arguments
/// * `config` - Retry configuration
/// * `operation_name` - Name of the operation for logging
/// * `operation` - Async function that returns a Result
/// * `on_failure` - Callback for each failed attempt (attempt number, error)
pub async fn retry_with_backoff<T, F, Fut, OnFailure>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    mut on_failure: OnFailure,
) -> Result<RetryResult<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    OnFailure: FnMut(u32, &LiveSwapError),
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(result) => {
                return Ok(RetryResult {
                    result,
                    attempts_made: attempt - 1,
                });
            }
            Err(err) if err.is_transport() => {
                on_failure(attempt, &err);

                if attempt >= max_attempts {
                    log::warn!("Max attempts ({max_attempts}) exhausted for {operation_name}");
                    return Err(err);
                }

                log::debug!(
                    "{operation_name} failed, waiting {} seconds before attempt {} of {max_attempts}",
                    config.delay_secs,
                    attempt + 1
                );
                tokio::time::sleep(Duration::from_secs(config.delay_secs)).await;
            }
            Err(other_error) => {
                return Err(other_error);
            }
        }
    }
}

/// Search the catalog, degrading every failure to an empty result set.
///
/// Transport failures are retried per `config`; once attempts are exhausted,
/// or on any non-transport error, the title is treated as having no
/// candidates.
pub async fn search_with_retry(
    client: &dyn CatalogClient,
    query: &str,
    limit: u32,
    config: &RetryConfig,
) -> SearchResultSet {
    let outcome = retry_with_backoff(
        config,
        "search",
        || client.search_tracks(query, limit),
        |attempt, err| log::warn!("Search attempt {attempt} for '{query}' failed: {err}"),
    )
    .await;

    match outcome {
        Ok(retry_result) => retry_result.result,
        Err(e) => {
            log::warn!("Giving up on search for '{query}': {e}");
            Vec::new()
        }
    }
}
