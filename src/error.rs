//! Error types for the Paddle API client.
//!
//! Every call either returns a decoded payload or exactly one [`Error`].
//! Nothing is retried or swallowed internally.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Paddle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Paddle API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A vendor endpoint was called without a vendor ID and auth code.
    #[error("A vendor_id and vendor_auth_code pair is required")]
    AuthenticationRequired,

    /// The request never produced a response (connect failure, timeout,
    /// truncated body).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a status other than 200.
    #[error("HTTP response code: {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// The body could not be read as a JSON object or array.
    #[error("API response is in wrong format: {body}")]
    MalformedResponse {
        /// Raw response body
        body: String,
    },

    /// Paddle reported `success: false`.
    #[error("Paddle API error {code}: {message}")]
    RemoteApi {
        /// Numeric error code supplied by Paddle
        code: i64,
        /// Human-readable error message supplied by Paddle
        message: String,
    },

    /// The unwrapped payload did not match the expected type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if the call failed for lack of vendor credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::AuthenticationRequired)
    }

    /// Returns `true` if Paddle itself rejected the request.
    pub fn is_remote_error(&self) -> bool {
        matches!(self, Error::RemoteApi { .. })
    }

    /// Returns `true` if the transport gave up waiting for a response.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport(err) => err.is_timeout(),
            _ => false,
        }
    }

    /// The Paddle error code, if this is a remote API error.
    ///
    /// # Example
    ///
    /// ```
    /// use paddle_rs::Error;
    ///
    /// let err = Error::RemoteApi { code: 123, message: "bad coupon".into() };
    /// assert_eq!(err.remote_code(), Some(123));
    /// assert_eq!(Error::AuthenticationRequired.remote_code(), None);
    /// ```
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            Error::RemoteApi { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Build a remote API error from the `error` member of a failed envelope.
    ///
    /// Paddle sends the code as a number, but a numeric string is tolerated.
    pub(crate) fn from_envelope(body: &Value) -> Self {
        let error = body.get("error");

        let code = error
            .and_then(|e| e.get("code"))
            .and_then(|c| match c {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .unwrap_or(0);

        let message = error
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        Error::RemoteApi { code, message }
    }
}
