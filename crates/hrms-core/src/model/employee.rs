// ── Employee domain type ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// One roster entry.
///
/// Immutable once fetched: the core only ever reads these, and a fresh
/// fetch replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    /// Unique within the roster (enforced by the backend).
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl Employee {
    /// Canonical picker label: `"{employee_id} - {full_name}"`.
    ///
    /// While a selection is committed the visible query text equals this
    /// exactly; any other text means the selection was abandoned.
    pub fn label(&self) -> String {
        format!("{} - {}", self.employee_id, self.full_name)
    }

    /// Case-insensitive substring match against id or full name.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.employee_id.to_lowercase().contains(needle)
            || self.full_name.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<hrms_api::EmployeeRecord> for Employee {
    fn from(rec: hrms_api::EmployeeRecord) -> Self {
        Self {
            employee_id: rec.employee_id,
            full_name: rec.full_name,
            email: rec.email,
            department: rec.department,
        }
    }
}

impl From<&Employee> for hrms_api::NewEmployee {
    fn from(e: &Employee) -> Self {
        Self {
            employee_id: e.employee_id.clone(),
            full_name: e.full_name.clone(),
            email: e.email.clone(),
            department: e.department.clone(),
        }
    }
}
