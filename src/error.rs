use thiserror::Error;

/// Error types for catalog search and playlist mutation.
///
/// Only [`LiveSwapError::Http`] is treated as a transport failure and retried by
/// the search boundary. Everything else is terminal for the operation that
/// produced it, and the runner records it against a single track or playlist
/// rather than aborting the run.
///
/// # Error Handling Examples
///
/// ```rust
/// use live_swap::LiveSwapError;
///
/// fn describe(err: &LiveSwapError) -> &'static str {
///     match err {
///         LiveSwapError::Http(_) => "network trouble, worth another try",
///         LiveSwapError::Api { status: 404, .. } => "playlist or track is gone",
///         LiveSwapError::Config(_) => "fix your setup first",
///         _ => "something else",
///     }
/// }
///
/// assert_eq!(
///     describe(&LiveSwapError::Http("connection reset".to_string())),
///     "network trouble, worth another try"
/// );
/// ```
#[derive(Error, Debug)]
pub enum LiveSwapError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, throttling
    /// (HTTP 429) and server-side errors (HTTP 5xx).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote service understood the request and refused it.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Error message extracted from the response body, if any
        message: String,
    },

    /// Failed to decode the service's response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Missing credentials or an unusable configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings or exception-list file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed settings or exception-list JSON.
    ///
    /// Response bodies that fail to decode are reported as
    /// [`LiveSwapError::Parse`] instead.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LiveSwapError {
    /// Whether this error came from the transport layer and may succeed on retry.
    pub fn is_transport(&self) -> bool {
        matches!(self, LiveSwapError::Http(_))
    }
}
