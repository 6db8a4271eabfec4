// ── Core error types ──
//
// User-facing errors from hrms-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<hrms_api::Error>` impl
// translates transport-layer errors into domain variants.
//
// Stale validation results are not errors. They are dropped inside the
// validator and never reach this type.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Network ──────────────────────────────────────────────────────
    /// The backend could not be reached or answered with garbage.
    /// Never treated as "available" or "no match"; callers retry by
    /// re-triggering the operation.
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    // ── Gating ───────────────────────────────────────────────────────
    /// A dependent action was attempted before its precondition held
    /// (no committed selection, identifier taken or still being checked).
    #[error("{message}")]
    PreconditionNotMet { message: String },

    /// Form input failed field rules. Each entry reads `"{Field}: {message}"`.
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    // ── Backend rejections ───────────────────────────────────────────
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionNotMet {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hrms_api::Error> for CoreError {
    fn from(err: hrms_api::Error) -> Self {
        match err {
            hrms_api::Error::Transport(ref e) => {
                if let Some(status) = e.status() {
                    CoreError::Api {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::NetworkFailure {
                        message: e.to_string(),
                    }
                }
            }
            hrms_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hrms_api::Error::Tls(msg) => CoreError::NetworkFailure {
                message: format!("TLS error: {msg}"),
            },
            hrms_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound { message },
            hrms_api::Error::Api {
                status: 400 | 409,
                message,
            } => CoreError::Conflict { message },
            hrms_api::Error::Api {
                status: status @ 500..=599,
                message,
            } => CoreError::NetworkFailure {
                message: format!("backend error (HTTP {status}): {message}"),
            },
            hrms_api::Error::Api { status, message } => CoreError::Api { status, message },
            hrms_api::Error::Deserialization { message, body: _ } => CoreError::NetworkFailure {
                message: format!("unreadable response: {message}"),
            },
        }
    }
}
