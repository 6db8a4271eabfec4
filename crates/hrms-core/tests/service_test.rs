#![allow(clippy::unwrap_used)]
// End-to-end tests for `Service` against a wiremock backend.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hrms_api::ApiClient;
use hrms_core::{
    AttendanceDraft, AttendanceStatus, CoreError, EmployeeDraft, SelectionState, Service,
    ServiceConfig, ValidationState,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Service) {
    let server = MockServer::start().await;
    let base = format!("{}/api/", server.uri());
    let client = ApiClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    let service = Service::with_client(ServiceConfig::new(base.parse().unwrap()), client);
    (server, service)
}

fn roster_body() -> serde_json::Value {
    json!([
        {
            "id": "a1",
            "employee_id": "E1",
            "full_name": "Ann Lee",
            "email": "ann@example.com",
            "department": "HR"
        },
        {
            "id": "a2",
            "employee_id": "E2",
            "full_name": "Bo Chen",
            "email": "bo@example.com",
            "department": "Engineering"
        }
    ])
}

async fn mount_roster(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_body()))
        .mount(server)
        .await;
}

fn draft(employee_id: &str) -> EmployeeDraft {
    EmployeeDraft {
        employee_id: employee_id.into(),
        full_name: "Dana Fox".into(),
        email: "dana@example.com".into(),
        department: "Ops".into(),
    }
}

// ── Identifier validation tests ─────────────────────────────────────

#[tokio::test]
async fn test_taken_identifier_blocks_create_without_request() {
    let (server, service) = setup().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let validator = service.validator();
    let started = Instant::now();
    validator.on_identifier_change("E1");
    let state = tokio::time::timeout(Duration::from_secs(5), validator.settled())
        .await
        .unwrap();

    assert_eq!(
        state,
        ValidationState::Taken {
            identifier: "E1".into()
        }
    );
    assert!(started.elapsed() >= Duration::from_millis(800));

    let err = service
        .create_employee(&draft("E1"), &state)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CoreError::PreconditionNotMet {
            message: "Employee ID: Already exists - please use a different ID".into()
        }
    );
}

#[tokio::test]
async fn test_roster_fetch_failure_is_failed_not_available() {
    let (server, service) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "detail": "down" })))
        .mount(&server)
        .await;

    let mut config = service.config().clone();
    config.debounce = Duration::from_millis(20);
    let service = Service::with_client(config, service.client().clone());

    let validator = service.validator();
    validator.on_identifier_change("E9");
    let state = tokio::time::timeout(Duration::from_secs(5), validator.settled())
        .await
        .unwrap();

    match state {
        ValidationState::Failed {
            identifier,
            message,
        } => {
            assert_eq!(identifier, "E9");
            assert!(message.contains("down"), "{message}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

// ── Employee tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_available_identifier_posts_and_invalidates_roster() {
    let (server, service) = setup().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({
            "employee_id": "DF1234",
            "full_name": "Dana Fox",
            "email": "dana@example.com",
            "department": "Ops"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "a3",
            "employee_id": "DF1234",
            "full_name": "Dana Fox",
            "email": "dana@example.com",
            "department": "Ops"
        })))
        .expect(1)
        .mount(&server)
        .await;

    service.roster().await.unwrap();
    assert_eq!(service.cached_roster().unwrap().len(), 2);

    let state = ValidationState::Available {
        identifier: "DF1234".into(),
    };
    let created = service
        .create_employee(&draft("DF1234"), &state)
        .await
        .unwrap();

    assert_eq!(created.label(), "DF1234 - Dana Fox");
    assert!(service.cached_roster().is_none());
}

#[tokio::test]
async fn test_create_with_stale_validation_is_blocked() {
    let (_server, service) = setup().await;

    let state = ValidationState::Available {
        identifier: "E7".into(),
    };
    let err = service
        .create_employee(&draft("E8"), &state)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::PreconditionNotMet { .. }));
}

#[tokio::test]
async fn test_padded_identifier_is_checked_and_created_trimmed() {
    let (server, service) = setup().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({
            "employee_id": "E9",
            "full_name": "Dana Fox",
            "email": "dana@example.com",
            "department": "Ops"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "a9",
            "employee_id": "E9",
            "full_name": "Dana Fox",
            "email": "dana@example.com",
            "department": "Ops"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = service.config().clone();
    config.debounce = Duration::from_millis(20);
    let service = Service::with_client(config, service.client().clone());
    let validator = service.validator();

    validator.on_identifier_change("E1 ");
    let taken = tokio::time::timeout(Duration::from_secs(5), validator.settled())
        .await
        .unwrap();
    let err = service
        .create_employee(&draft("E1 "), &taken)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CoreError::PreconditionNotMet {
            message: "Employee ID: Already exists - please use a different ID".into()
        }
    );

    validator.on_identifier_change(" E9 ");
    let available = tokio::time::timeout(Duration::from_secs(5), validator.settled())
        .await
        .unwrap();
    assert_eq!(
        available,
        ValidationState::Available {
            identifier: "E9".into()
        }
    );
    let created = service
        .create_employee(&draft(" E9 "), &available)
        .await
        .unwrap();
    assert_eq!(created.employee_id, "E9");
}

#[tokio::test]
async fn test_create_reports_field_errors_first() {
    let (_server, service) = setup().await;

    let mut bad = draft("E1");
    bad.email = "not-an-email".into();
    let err = service
        .create_employee(&bad, &ValidationState::Idle)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CoreError::Validation {
            errors: vec!["Email Address: Invalid email address".into()]
        }
    );
}

#[tokio::test]
async fn test_backend_duplicate_is_conflict() {
    let (server, service) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Employee with email dana@example.com already exists"
        })))
        .mount(&server)
        .await;

    let failed = ValidationState::Failed {
        identifier: "E5".into(),
        message: "timeout".into(),
    };
    let err = service
        .create_employee(&draft("E5"), &failed)
        .await
        .unwrap_err();
    assert!(
        matches!(err, CoreError::Conflict { ref message } if message.contains("already exists")),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_delete_missing_employee_is_not_found() {
    let (server, service) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/employees/E404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "detail": "Employee with ID E404 not found" })),
        )
        .mount(&server)
        .await;

    let err = service.delete_employee("E404").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

// ── Selection + attendance tests ────────────────────────────────────

#[tokio::test]
async fn test_search_pick_mark_and_clear() {
    let (server, service) = setup().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .and(body_json(json!({
            "employee_id": "E1",
            "date": "2024-06-15",
            "status": "Present"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "r1",
            "employee_id": "E1",
            "date": "2024-06-15",
            "status": "Present",
            "employee_name": "Ann Lee"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut selector = service.selector().await.unwrap();
    let candidates = selector.on_query_change("ann");
    assert_eq!(candidates.len(), 1);
    assert!(selector.dropdown_visible());

    selector.on_candidate_pick(candidates[0].clone());
    assert_eq!(selector.query(), "E1 - Ann Lee");

    let draft = AttendanceDraft::new(
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        AttendanceStatus::Present,
    );
    let record = service.mark_attendance(&selector, &draft).await.unwrap();
    assert_eq!(record.employee_name.as_deref(), Some("Ann Lee"));

    selector.on_clear();
    assert_eq!(selector.state(), &SelectionState::Empty);
    assert_eq!(selector.candidates().len(), 2);
}

#[tokio::test]
async fn test_mark_without_selection_sends_nothing() {
    let (server, service) = setup().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut selector = service.selector().await.unwrap();
    selector.on_query_change("E1");

    let err = service
        .mark_attendance(&selector, &AttendanceDraft::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please select an employee");
}

#[tokio::test]
async fn test_duplicate_attendance_is_conflict() {
    let (server, service) = setup().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Attendance already marked for E2 on 2024-06-14"
        })))
        .mount(&server)
        .await;

    let mut selector = service.selector().await.unwrap();
    selector.resolve_unique("E2").unwrap();

    let draft = AttendanceDraft::new(
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        AttendanceStatus::Absent,
    );
    let err = service.mark_attendance(&selector, &draft).await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict { .. }));
}
