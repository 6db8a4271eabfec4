//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hrms_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const PRECONDITION: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the HRMS backend: {message}")]
    #[diagnostic(
        code(hrms::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Try: hrms health --url http://localhost:8000/api/"
        )
    )]
    ConnectionFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(hrms::not_found),
        help("Run: hrms employees list to see available employees")
    )]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(hrms::conflict))]
    Conflict { message: String },

    #[error("Employee ID '{identifier}' already exists")]
    #[diagnostic(
        code(hrms::id_taken),
        help("Pick another ID, or suggest one with: hrms employees generate-id \"<full name>\"")
    )]
    IdTaken { identifier: String },

    // ── Gating ───────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(hrms::precondition),
        help("Narrow the search to a single employee, e.g. by exact employee ID.")
    )]
    Precondition { message: String },

    #[error("Employee details are invalid:\n  {}", errors.join("\n  "))]
    #[diagnostic(code(hrms::invalid_input))]
    InvalidInput { errors: Vec<String> },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(hrms::api_error))]
    ApiError { status: u16, message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(hrms::internal))]
    Internal { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hrms::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hrms::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hrms config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(hrms::config))]
    Config(#[from] hrms_config::ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(hrms::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } | Self::IdTaken { .. } => exit_code::CONFLICT,
            Self::Precondition { .. } => exit_code::PRECONDITION,
            Self::Validation { .. }
            | Self::InvalidInput { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NetworkFailure { message } => CliError::ConnectionFailed { message },
            CoreError::PreconditionNotMet { message } => CliError::Precondition { message },
            CoreError::Validation { errors } => CliError::InvalidInput { errors },
            CoreError::Conflict { message } => CliError::Conflict { message },
            CoreError::NotFound { message } => CliError::NotFound { message },
            CoreError::Api { status, message } => CliError::ApiError { status, message },
            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}
