// Wire types for the HRMS backend.
//
// Field names follow the backend's snake_case JSON verbatim. Dates travel
// as ISO `YYYY-MM-DD` strings, which chrono's `NaiveDate` serde impl
// reads and writes directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// An employee as returned by `GET employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Backend storage id (opaque).
    #[serde(default)]
    pub id: String,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Create payload for `POST employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Attendance status. Serialized exactly as the backend expects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

/// Create payload for `POST attendance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// An attendance record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    /// Resolved by the backend; `"Unknown"` for deleted employees.
    #[serde(default)]
    pub employee_name: Option<String>,
}

/// Per-employee totals from `GET attendance/summary/{employee_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub employee_id: String,
    pub employee_name: String,
    pub total_present: u32,
    pub total_absent: u32,
    pub total_days: u32,
}

/// Optional filters for `GET attendance`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub employee_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AttendanceQuery {
    /// Render as query-string pairs, skipping unset filters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref id) = self.employee_id {
            params.push(("employee_id", id.clone()));
        }
        if let Some(start) = self.start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.to_string()));
        }
        params
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
