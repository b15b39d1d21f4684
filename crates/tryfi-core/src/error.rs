// ── Core error types ──
//
// Domain errors raised while normalising backend payloads. Transport
// failures are carried through `Api` untouched so callers can still
// inspect the HTTP-level cause.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Payload shape ────────────────────────────────────────────────
    /// A required key is absent from the payload.
    #[error("Missing field: {field}")]
    MissingField { field: String },

    /// A key is present but holds the wrong JSON type.
    #[error("Invalid field {field}: expected {expected}")]
    InvalidField { field: String, expected: String },

    /// Semantically invalid input, such as unparseable timestamp text.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Usage ────────────────────────────────────────────────────────
    /// A detail field was read before the first successful fetch.
    #[error("{field} has not been loaded yet")]
    NotLoaded { field: String },

    // ── Session ──────────────────────────────────────────────────────
    #[error("TryFiLoginError: {message}")]
    LoginFailed { message: String },

    // ── Transport (passed through) ───────────────────────────────────
    #[error(transparent)]
    Api(#[from] tryfi_api::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this is the distinguished validation kind.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this is a plain key-lookup failure.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}
