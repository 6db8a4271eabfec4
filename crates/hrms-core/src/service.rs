// ── Service facade ──
//
// Ties the API client to the domain units. Owns the last roster snapshot
// and drops it whenever a mutation makes it stale. Gated actions check
// their preconditions here, before any request leaves the process.

use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info};

use hrms_api::{
    ApiClient, AttendanceQuery, AttendanceRecord, AttendanceSummary, HealthStatus,
};

use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::form::{AttendanceDraft, EmployeeDraft};
use crate::model::{Employee, Roster};
use crate::selector::Selector;
use crate::source::RosterSource;
use crate::validator::{IdValidator, ValidationState, ensure_identifier_claimable};

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct Service {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    config: ServiceConfig,
    client: ApiClient,
    roster: ArcSwapOption<Roster>,
}

impl Service {
    /// Build the HTTP client described by `config`.
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.url.as_str(), &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Use a pre-built client (tests point this at a mock server).
    pub fn with_client(config: ServiceConfig, client: ApiClient) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                config,
                client,
                roster: ArcSwapOption::empty(),
            }),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    // ── Roster ───────────────────────────────────────────────────

    /// Fetch a fresh roster and remember it.
    pub async fn roster(&self) -> Result<Roster, CoreError> {
        let records = self.inner.client.list_employees().await?;
        let roster = Roster::from(records);
        debug!(count = roster.len(), "roster fetched");
        self.inner.roster.store(Some(Arc::new(roster.clone())));
        Ok(roster)
    }

    /// The last fetched roster, unless a mutation has invalidated it.
    pub fn cached_roster(&self) -> Option<Roster> {
        self.inner.roster.load_full().map(|r| Roster::clone(&r))
    }

    pub fn invalidate_roster(&self) {
        self.inner.roster.store(None);
    }

    /// A debounced validator fed by this service, paced by the configured
    /// debounce.
    pub fn validator(&self) -> IdValidator<Self> {
        IdValidator::with_debounce(self.clone(), self.inner.config.debounce)
    }

    /// A selector over a freshly fetched roster.
    pub async fn selector(&self) -> Result<Selector, CoreError> {
        Ok(Selector::new(self.roster().await?))
    }

    // ── Employees ────────────────────────────────────────────────

    /// Create an employee.
    ///
    /// Order: field rules, then the uniqueness gate on `validation`, then
    /// the request. A backend duplicate rejection surfaces as `Conflict`.
    pub async fn create_employee(
        &self,
        draft: &EmployeeDraft,
        validation: &ValidationState,
    ) -> Result<Employee, CoreError> {
        let payload = draft.validate()?;
        ensure_identifier_claimable(validation, &payload.employee_id)?;

        let record = self.inner.client.create_employee(&payload).await?;
        self.invalidate_roster();
        info!(employee_id = %record.employee_id, "employee created");
        Ok(Employee::from(record))
    }

    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), CoreError> {
        self.inner.client.delete_employee(employee_id).await?;
        self.invalidate_roster();
        info!(employee_id, "employee deleted");
        Ok(())
    }

    // ── Attendance ───────────────────────────────────────────────

    /// Mark attendance for the selector's committed employee.
    ///
    /// The payload carries the selected employee's id, never the typed
    /// query text.
    pub async fn mark_attendance(
        &self,
        selector: &Selector,
        draft: &AttendanceDraft,
    ) -> Result<AttendanceRecord, CoreError> {
        let employee = selector.require_selected()?;
        draft.validate()?;

        let record = self
            .inner
            .client
            .mark_attendance(&draft.payload(&employee.employee_id))
            .await?;
        info!(
            employee_id = %record.employee_id,
            date = %record.date,
            status = %record.status,
            "attendance marked"
        );
        Ok(record)
    }

    pub async fn attendance(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, CoreError> {
        Ok(self.inner.client.list_attendance(query).await?)
    }

    pub async fn attendance_summary(
        &self,
        employee_id: &str,
    ) -> Result<AttendanceSummary, CoreError> {
        Ok(self.inner.client.attendance_summary(employee_id).await?)
    }

    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        Ok(self.inner.client.health().await?)
    }
}

impl RosterSource for Service {
    fn fetch_roster(&self) -> impl Future<Output = Result<Roster, CoreError>> + Send {
        self.roster()
    }
}
