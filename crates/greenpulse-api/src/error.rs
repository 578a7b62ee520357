use thiserror::Error;

/// Top-level error type for the `greenpulse-api` crate.
///
/// Covers every failure mode of the two external capabilities: the
/// classification provider and the static image source. `greenpulse-core`
/// maps these into `ClassificationUnavailable` / `ImageUnavailable`
/// depending on which path produced them.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Failed to construct the underlying HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Classification provider ─────────────────────────────────────
    /// Structured error reported by the classification provider, either as
    /// a non-2xx status or as an `error` object inside a 200 body. `code` is
    /// the provider's own status code when the body carried one.
    #[error("Vision API error (HTTP {status}): {message}")]
    Vision {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    // ── Image source ────────────────────────────────────────────────
    /// Image source answered with something other than `200 OK`.
    #[error("Unexpected HTTP {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body did not have the expected shape, with the raw body
    /// for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced a usable response
    /// because the configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
