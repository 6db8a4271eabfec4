//! Domain layer between `hrms-api` and UI consumers (the `hrms` CLI).
//!
//! Owns the employee identifier and selection logic:
//!
//! - **[`idgen`]**: Pure generator turning a display name into a candidate
//!   identifier (`"John Doe"` → `JD4821`). No uniqueness guarantee.
//!
//! - **[`IdValidator`]**: Debounced uniqueness check. Every edit restarts
//!   an 800 ms timer; only the last timer fetches the roster, and results
//!   are tagged so a late answer for old input never lands. State is
//!   published on a `tokio::sync::watch` channel.
//!
//! - **[`Selector`]**: Typeahead state machine over a [`Roster`]
//!   snapshot. Dependent actions read its committed employee, never the
//!   typed text.
//!
//! - **[`Service`]**: Facade over the API client: implements
//!   [`RosterSource`], caches the last roster, and gates create/mark
//!   requests on form rules, validation state, and selection.

pub mod config;
pub mod error;
pub mod form;
pub mod idgen;
pub mod model;
pub mod selector;
pub mod service;
pub mod source;
pub mod validator;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_URL, ServiceConfig, TlsVerification};
pub use error::CoreError;
pub use form::{AttendanceDraft, EmployeeDraft};
pub use model::{Employee, Roster};
pub use selector::{SelectionState, Selector};
pub use service::Service;
pub use source::RosterSource;
pub use validator::{IdValidator, ValidationState, ensure_identifier_claimable};

// ── Wire types consumers need alongside the facade ──────────────────
pub use hrms_api::{
    AttendanceQuery, AttendanceRecord, AttendanceStatus, AttendanceSummary, HealthStatus,
};
