//! Error taxonomy for the client.

use std::fmt::{self, Display, Formatter};

use serde::Deserialize;

/// Errors surfaced by every client operation.
///
/// Nothing here is retried automatically; callers decide whether a
/// [`Error::RateLimited`] or [`Error::Transport`] failure is worth another
/// attempt, and a fresh idempotency key is generated for each one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network-level failure before a usable response was received.
    #[error("unable to send request")]
    Transport(#[source] reqwest::Error),

    /// The server answered 429. Header values are kept as opaque strings
    /// since the API does not guarantee a numeric format.
    #[error("rate limited with limit: {limit}, remaining: {remaining}, reset: {reset}")]
    RateLimited {
        /// `X-Ratelimit-Limit` header value.
        limit: String,
        /// `X-Ratelimit-Remaining` header value.
        remaining: String,
        /// `X-Ratelimit-Reset` header value.
        reset: String,
    },

    /// Structured validation errors decoded from the response body.
    #[error(transparent)]
    Api(#[from] ApiErrors),

    /// Non-success status without a decodable error envelope.
    #[error("received status code: {0}")]
    Status(u16),

    /// The response body could not be decoded as the expected type.
    #[error("unable to decode json")]
    Decode(#[source] reqwest::Error),

    /// The request payload could not be serialized.
    #[error("unable to encode json")]
    Encode(#[source] serde_json::Error),

    /// A page fetch failed partway through draining a listing.
    #[error("unable to get a {resource} page")]
    Pagination {
        /// Resource being listed (`rules` or `hosts`).
        resource: &'static str,
        /// The failure that ended pagination.
        #[source]
        source: Box<Error>,
    },

    /// The server reported more pages but its `next` link carried no
    /// `starting_after` parameter to continue from.
    #[error("unable to extract cursor from next link: {0:?}")]
    Cursor(Option<String>),

    /// A get-by-id response carried a different id than requested.
    #[error("received incorrect {resource}: {actual}")]
    Mismatch {
        /// Resource that was requested (`rule` or `host`).
        resource: &'static str,
        /// Identifier found in the response body.
        actual: String,
    },
}

/// Error envelope returned by the API for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrors {
    /// Machine-readable error class, e.g. `invalid_request_error`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable summary.
    #[serde(default)]
    pub message: String,
    /// Per-field validation problems.
    #[serde(default)]
    pub errors: Vec<ApiFieldError>,
}

/// A single field-level validation problem inside [`ApiErrors`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiFieldError {
    /// Resource the parameter belongs to.
    #[serde(default)]
    pub resource: String,
    /// Offending parameter name.
    #[serde(default)]
    pub param: String,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

impl Display for ApiErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if !self.errors.is_empty() {
            write!(f, "\nerrors:")?;
            for error in &self.errors {
                write!(
                    f,
                    "\n- resource: {}, param: {}, code: {}, message: {}",
                    error.resource, error.param, error.code, error.message
                )?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiErrors {}
