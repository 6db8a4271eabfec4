// hrms-api: Async Rust client for the HRMS Lite REST API

pub mod attendance;
pub mod client;
pub mod employees;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    AttendanceQuery, AttendanceRecord, AttendanceStatus, AttendanceSummary, EmployeeRecord,
    HealthStatus, NewAttendance, NewEmployee,
};
pub use transport::{TlsMode, TransportConfig};
