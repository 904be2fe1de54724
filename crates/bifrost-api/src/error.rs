use thiserror::Error;

/// Top-level error type for the `bifrost-api` crate.
///
/// Covers transport failures, non-success HTTP responses and body decoding.
/// `bifrost-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Rate limited by the signup endpoint.
    #[error("Rate limited (HTTP 429)")]
    RateLimited { message: Option<String> },

    /// Non-success response, with the `{error, fields}` body when the server sent one.
    #[error("API error (HTTP {status}): {}", message.as_deref().unwrap_or("no details"))]
    Api {
        status: u16,
        message: Option<String>,
        fields: Vec<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
