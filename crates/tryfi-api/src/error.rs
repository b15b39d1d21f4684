use thiserror::Error;

/// Top-level error type for the `tryfi-api` crate.
///
/// Covers every failure mode of the transport: authentication, HTTP,
/// GraphQL envelopes, and response decoding. `tryfi-core` wraps these
/// transparently so callers see them unmodified.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The login endpoint answered HTTP 200 with an `error` envelope.
    #[error("TryFiLoginError: {message}")]
    Login { message: String },

    /// A query or mutation was attempted before a successful login.
    #[error("Not authenticated -- call login first")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, non-2xx status, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── GraphQL ─────────────────────────────────────────────────────
    /// Non-empty `errors` array in a GraphQL response.
    #[error("GraphQL error: {message}")]
    Graphql { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The response is valid JSON but lacks the expected `data` path.
    #[error("Response is missing {path}")]
    MissingData { path: String },
}

impl Error {
    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Login { .. } | Self::NotAuthenticated => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient network error.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
