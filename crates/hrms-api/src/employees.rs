// Employee endpoints
//
// The backend does no server-side filtering: `list_employees` always
// returns the full roster and every search happens client-side.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{EmployeeRecord, NewEmployee};

impl ApiClient {
    /// Fetch the full roster.
    ///
    /// `GET employees`
    pub async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, Error> {
        debug!("listing employees");
        self.get("employees").await
    }

    /// Create one employee.
    ///
    /// `POST employees`. Fails with HTTP 400 when the employee id or email
    /// is already taken; see [`Error::is_conflict`].
    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<EmployeeRecord, Error> {
        debug!(employee_id = %employee.employee_id, "creating employee");
        self.post("employees", employee).await
    }

    /// Delete an employee and, server-side, all of their attendance.
    ///
    /// `DELETE employees/{employee_id}`
    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), Error> {
        debug!(employee_id, "deleting employee");
        self.delete(&format!("employees/{}", Self::segment(employee_id)))
            .await
    }
}
