use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum FmError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The FinMind envelope reported a non-200 status.
    #[error("FinMind API error {status}: {msg}")]
    Api {
        /// The status code carried inside the JSON envelope.
        status: i64,
        /// The message carried inside the JSON envelope.
        msg: String,
    },

    /// A JSON document could not be decoded or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A local file (state, output, watchlist) could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML document (watchlist) could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Credentials were required for the batch but none were configured.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// An invalid date range was provided for a revenue request (start must be before end).
    #[error("invalid date range: start must be before end")]
    InvalidDates,
}
