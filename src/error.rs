use thiserror::Error;

/// Error types for Last.fm queries.
///
/// Every failure in this crate is returned to the caller; nothing here aborts the process.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use lastfm_feed::{ClientConfig, LastFmError, LastFmFeedClient, LastFmFeedClientImpl};
///
/// #[tokio::main]
/// async fn main() {
///     let client = LastFmFeedClientImpl::new(
///         Box::new(http_client::native::NativeClient::new()),
///         ClientConfig::new("rj", "api-key"),
///     );
///
///     match client.get_user().await {
///         Ok(user) => println!("{user}"),
///         Err(LastFmError::Api { code, message }) => eprintln!("Last.fm said {code}: {message}"),
///         Err(LastFmError::Http(msg)) => eprintln!("Network error: {msg}"),
///         Err(LastFmError::Decode(msg)) => eprintln!("Unexpected response: {msg}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum LastFmError {
    /// HTTP/network related errors.
    ///
    /// Raised when the transport fails, the body cannot be read, or the service answers
    /// with a non-success status and no error envelope.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body was not JSON, or not the JSON shape the query expects.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Timestamp text matched neither of the service's date layouts.
    #[error("Failed to parse date: {0}")]
    Parse(String),

    /// Error envelope returned by the Last.fm API itself.
    ///
    /// # Common Causes
    /// - `6`: user not found
    /// - `10`: invalid API key
    /// - `29`: rate limit exceeded
    #[error("Last.fm API error {code}: {message}")]
    Api {
        /// Numeric Last.fm error code
        code: u32,
        /// Human readable message from the service
        message: String,
    },

    /// Missing or invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LastFmError {
    fn from(err: serde_json::Error) -> Self {
        LastFmError::Decode(err.to_string())
    }
}
