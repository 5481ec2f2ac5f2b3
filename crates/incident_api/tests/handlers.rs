use axum::body::to_bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use incident_api::dto::{CreateIncidentRequest, ListIncidentsQuery, UpdateStatusRequest};
use incident_api::handlers::{
    create_incident, health, list_incidents, root, update_incident_status,
};
use incident_api::{router, AppState};
use incident_core::Database;
use serde_json::Value;
use tempfile::TempDir;

fn test_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let database = Database::open(dir.path().join("incidents.db")).unwrap();
    (dir, AppState::new(database))
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(state: &AppState, text: &str, status: Option<&str>, source: &str) -> Response {
    create_incident(
        State(state.clone()),
        Json(CreateIncidentRequest {
            text: text.to_string(),
            status: status.map(str::to_string),
            source: source.to_string(),
        }),
    )
    .await
    .into_response()
}

async fn list(state: &AppState, status: Option<&str>) -> Response {
    list_incidents(
        State(state.clone()),
        Query(ListIncidentsQuery {
            status: status.map(str::to_string),
        }),
    )
    .await
    .into_response()
}

async fn patch_status(state: &AppState, id: i64, new_status: &str) -> Response {
    update_incident_status(
        State(state.clone()),
        Path(id),
        Json(UpdateStatusRequest {
            new_status: new_status.to_string(),
        }),
    )
    .await
    .into_response()
}

#[tokio::test]
async fn create_list_update_scenario() {
    let (_dir, state) = test_state();

    let created = create(&state, "Scooter 5 offline", Some("pending"), "monitoring").await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = body_json(created).await;
    assert!(body["message"].is_string());

    let listed = list(&state, None).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let body = body_json(listed).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["text"], "Scooter 5 offline");
    assert_eq!(items[0]["status"], "pending");
    assert_eq!(items[0]["source"], "monitoring");
    assert!(items[0]["created_at"].is_string());

    let updated = patch_status(&state, 1, "solved").await;
    assert_eq!(updated.status(), StatusCode::OK);

    let pending = body_json(list(&state, Some("pending")).await).await;
    assert!(pending.as_array().unwrap().is_empty());
    let solved = body_json(list(&state, Some("solved")).await).await;
    assert_eq!(solved.as_array().unwrap()[0]["id"], 1);
}

#[tokio::test]
async fn create_defaults_status_to_pending() {
    let (_dir, state) = test_state();

    let created = create(&state, "no status given", None, "operator").await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let pending = body_json(list(&state, Some(" PENDING ")).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_with_invalid_values_returns_bad_request_naming_value() {
    let (_dir, state) = test_state();

    let response = create(&state, "x", Some("archived"), "operator").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("archived"));

    let response = create(&state, "x", Some("pending"), "customer").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("customer"));

    let listed = body_json(list(&state, None).await).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_with_invalid_status_returns_bad_request() {
    let (_dir, state) = test_state();

    let response = list(&state, Some("closed")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_incident_returns_not_found() {
    let (_dir, state) = test_state();

    let response = patch_status(&state, 999, "solved").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn update_with_invalid_status_returns_bad_request() {
    let (_dir, state) = test_state();
    create(&state, "x", None, "partner").await;

    let response = patch_status(&state, 1, "reopened").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let pending = body_json(list(&state, None).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn storage_failure_returns_generic_internal_error() {
    let (dir, state) = test_state();
    let conn = state.database.connect().unwrap();
    conn.execute_batch("DROP TABLE incidents;").unwrap();
    drop(conn);

    let response = list(&state, None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert_eq!(detail, "failed to list incidents");
    assert!(!detail.contains("incidents.db"));
    drop(dir);
}

#[tokio::test]
async fn root_and_health_respond() {
    let root_body = serde_json::to_value(root().await.0).unwrap();
    assert_eq!(root_body["message"], "Incident Management System API");

    let health_body = serde_json::to_value(health().await.0).unwrap();
    assert_eq!(health_body["status"], "ok");
}

#[test]
fn router_builds_with_state() {
    let (_dir, state) = test_state();
    let _app = router(state);
}

#[tokio::test]
async fn create_and_update_accept_mixed_case_values() {
    let (_dir, state) = test_state();

    let created = create(&state, "mixed case", Some(" In Progress "), "OPERATOR").await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = body_json(list(&state, Some("in progress")).await).await;
    assert_eq!(listed[0]["status"], "in progress");
    assert_eq!(listed[0]["source"], "operator");

    let updated = patch_status(&state, 1, "SOLVED").await;
    assert_eq!(updated.status(), StatusCode::OK);
    let solved = body_json(list(&state, Some("solved")).await).await;
    assert_eq!(solved.as_array().unwrap().len(), 1);
}
