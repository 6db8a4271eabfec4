// ── Form field rules ──
//
// Client-side checks run before anything is sent. Every failing field is
// reported, in field order, as `"{Field}: {message}"`.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use hrms_api::{AttendanceStatus, NewAttendance, NewEmployee};

use crate::error::CoreError;

const MAX_NAME_CHARS: usize = 100;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s.'-]+$").expect("valid name regex"));

/// Local part, `@`, dotted domain ending in an alphabetic TLD.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+.-]*[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}$")
        .expect("valid email regex")
});

// ── Employee form ────────────────────────────────────────────────

/// Raw input of the add-employee form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl EmployeeDraft {
    /// Check every field; on success return the trimmed create payload.
    pub fn validate(&self) -> Result<NewEmployee, CoreError> {
        let employee_id = self.employee_id.trim();
        let full_name = self.full_name.trim();
        let email = self.email.trim();
        let department = self.department.trim();

        let mut errors = Vec::new();

        if employee_id.is_empty() {
            errors.push("Employee ID: Employee ID is required".to_owned());
        }

        if full_name.is_empty() {
            errors.push("Full Name: Name is required".to_owned());
        } else {
            if full_name.chars().count() > MAX_NAME_CHARS {
                errors.push("Full Name: Name must be less than 100 characters".to_owned());
            }
            if !NAME_RE.is_match(full_name) {
                errors.push(
                    "Full Name: Name can only contain letters, spaces, dots, hyphens and apostrophes"
                        .to_owned(),
                );
            }
        }

        if email.is_empty() {
            errors.push("Email Address: Email is required".to_owned());
        } else if !is_valid_email(email) {
            errors.push("Email Address: Invalid email address".to_owned());
        }

        if department.is_empty() {
            errors.push("Department: Department is required".to_owned());
        }

        if !errors.is_empty() {
            return Err(CoreError::Validation { errors });
        }

        Ok(NewEmployee {
            employee_id: employee_id.to_owned(),
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            department: department.to_owned(),
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

// ── Attendance form ──────────────────────────────────────────────

/// Date and status half of the attendance form. The employee comes from
/// the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDraft {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl Default for AttendanceDraft {
    fn default() -> Self {
        Self {
            date: Local::now().date_naive(),
            status: AttendanceStatus::default(),
        }
    }
}

impl AttendanceDraft {
    pub fn new(date: NaiveDate, status: AttendanceStatus) -> Self {
        Self { date, status }
    }

    /// Reject dates after today (local time).
    pub fn validate(&self) -> Result<(), CoreError> {
        self.validate_on(Local::now().date_naive())
    }

    /// [`validate`](Self::validate) against an explicit "today".
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), CoreError> {
        if self.date > today {
            return Err(CoreError::Validation {
                errors: vec!["Date: Date cannot be in the future".to_owned()],
            });
        }
        Ok(())
    }

    pub(crate) fn payload(&self, employee_id: &str) -> NewAttendance {
        NewAttendance {
            employee_id: employee_id.to_owned(),
            date: self.date,
            status: self.status,
        }
    }
}
