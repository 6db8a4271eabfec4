// ── Roster snapshot ──
//
// Point-in-time, read-only view of every employee. Cloning is an `Arc`
// bump; nothing ever mutates a snapshot in place.

use std::sync::Arc;

use serde::Serialize;

use super::Employee;

/// Ordered snapshot of the employee roster.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Roster {
    employees: Arc<Vec<Arc<Employee>>>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(employees.into_iter().map(Arc::new).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Employee>> {
        self.employees.iter()
    }

    /// Every entry, in fetch order.
    pub fn all(&self) -> Vec<Arc<Employee>> {
        self.employees.iter().cloned().collect()
    }

    /// Exact, case-sensitive identifier lookup.
    ///
    /// This is the uniqueness rule: `"e1"` does not collide with `"E1"`,
    /// even though search treats them as equal.
    pub fn find(&self, employee_id: &str) -> Option<&Arc<Employee>> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }

    pub fn contains_id(&self, employee_id: &str) -> bool {
        self.find(employee_id).is_some()
    }

    /// Case-insensitive substring search over id and full name.
    ///
    /// A blank (empty or whitespace-only) query yields the full roster.
    /// Order follows the roster.
    pub fn filter(&self, query: &str) -> Vec<Arc<Employee>> {
        if query.trim().is_empty() {
            return self.all();
        }
        let needle = query.to_lowercase();
        self.employees
            .iter()
            .filter(|e| e.matches_lowercase(&needle))
            .cloned()
            .collect()
    }
}

impl FromIterator<Employee> for Roster {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<hrms_api::EmployeeRecord>> for Roster {
    fn from(records: Vec<hrms_api::EmployeeRecord>) -> Self {
        records.into_iter().map(Employee::from).collect()
    }
}
