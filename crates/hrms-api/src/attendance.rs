// Attendance endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    AttendanceQuery, AttendanceRecord, AttendanceSummary, HealthStatus, NewAttendance,
};

impl ApiClient {
    /// Record attendance for one employee on one date.
    ///
    /// `POST attendance`. HTTP 404 for an unknown employee, HTTP 400 when
    /// the date is already marked.
    pub async fn mark_attendance(
        &self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, Error> {
        debug!(
            employee_id = %attendance.employee_id,
            date = %attendance.date,
            status = %attendance.status,
            "marking attendance"
        );
        self.post("attendance", attendance).await
    }

    /// List attendance records, newest first.
    ///
    /// `GET attendance?employee_id=&start_date=&end_date=`
    pub async fn list_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, Error> {
        let params = query.to_params();
        debug!(?params, "listing attendance");
        if params.is_empty() {
            self.get("attendance").await
        } else {
            self.get_with_params("attendance", &params).await
        }
    }

    /// Present/absent totals for one employee.
    ///
    /// `GET attendance/summary/{employee_id}`
    pub async fn attendance_summary(&self, employee_id: &str) -> Result<AttendanceSummary, Error> {
        debug!(employee_id, "fetching attendance summary");
        self.get(&format!("attendance/summary/{}", Self::segment(employee_id)))
            .await
    }

    /// Backend liveness probe.
    ///
    /// `GET /health` (host root, outside the API prefix)
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        self.get("/health").await
    }
}
