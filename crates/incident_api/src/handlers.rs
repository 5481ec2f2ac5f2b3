//! Route handlers for the incident API.
//!
//! # Responsibility
//! - Map HTTP requests onto `IncidentService` calls.
//! - Map service outcomes onto status codes and JSON bodies.
//!
//! # Invariants
//! - Every service call runs in its own unit of work on the blocking pool.
//! - A missing `status` filter defaults to `pending` here, never in the service.

use crate::dto::{
    CreateIncidentRequest, HealthResponse, ListIncidentsQuery, MessageResponse,
    UpdateStatusRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use incident_core::{
    CreateIncident, IncidentDto, IncidentId, IncidentService, IncidentStatus, ServiceError,
    SqliteIncidentRepository, StatusUpdateOutcome,
};
use log::{error, info};

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Incident Management System API"))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /incidents/`
pub async fn create_incident(
    State(state): State<AppState>,
    Json(body): Json<CreateIncidentRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let request = CreateIncident {
        status: body.status_or_default().to_string(),
        text: body.text,
        source: body.source,
    };

    let id = with_incident_service(&state, move |service| service.create_incident(&request))
        .await
        .map_err(|err| err.into_api("incident_create", "failed to create incident"))?;

    info!("event=http_create_incident module=api status=ok id={id}");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("New incident added to the database!")),
    ))
}

/// `GET /incidents/?status=<status>`
pub async fn list_incidents(
    State(state): State<AppState>,
    Query(query): Query<ListIncidentsQuery>,
) -> ApiResult<Json<Vec<IncidentDto>>> {
    let status = query
        .status
        .unwrap_or_else(|| IncidentStatus::Pending.as_str().to_string());

    let incidents = with_incident_service(&state, move |service| {
        service.get_incidents(Some(status.as_str()))
    })
    .await
    .map_err(|err| err.into_api("incident_list", "failed to list incidents"))?;

    info!(
        "event=http_list_incidents module=api status=ok count={}",
        incidents.len()
    );
    Ok(Json(incidents))
}

/// `PATCH /incidents/{id}/status`
pub async fn update_incident_status(
    State(state): State<AppState>,
    Path(id): Path<IncidentId>,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let outcome = with_incident_service(&state, move |service| {
        service.update_status(id, body.new_status.as_str())
    })
    .await
    .map_err(|err| err.into_api("incident_update_status", "failed to update incident status"))?;

    info!(
        "event=http_update_status module=api status=ok id={} code={}",
        id,
        outcome.code()
    );
    match outcome {
        StatusUpdateOutcome::Updated => Ok(Json(MessageResponse::new(
            "Incident status updated successfully",
        ))),
        StatusUpdateOutcome::NotFound => Err(ApiError::NotFound(format!(
            "Incident with ID {id} not found"
        ))),
    }
}

/// Failure of one scoped service call.
enum CallError {
    Service(ServiceError),
    /// The blocking task panicked or was cancelled.
    Join(tokio::task::JoinError),
}

impl CallError {
    fn into_api(self, operation: &'static str, generic: &'static str) -> ApiError {
        match self {
            Self::Service(err) => ApiError::from_service(operation, err, generic),
            Self::Join(err) => {
                error!(
                    "event={} module=api status=error error_code=worker_failed error={}",
                    operation, err
                );
                ApiError::Internal(generic)
            }
        }
    }
}

/// Runs `work` against a service bound to a fresh unit of work.
async fn with_incident_service<T, F>(state: &AppState, work: F) -> Result<T, CallError>
where
    T: Send + 'static,
    F: FnOnce(&IncidentService<SqliteIncidentRepository<'_>>) -> Result<T, ServiceError>
        + Send
        + 'static,
{
    let database = state.database.clone();
    let joined = tokio::task::spawn_blocking(move || {
        database.unit_of_work(|tx| {
            let service = IncidentService::new(SqliteIncidentRepository::new(tx));
            work(&service)
        })
    })
    .await;

    match joined {
        Ok(result) => result.map_err(CallError::Service),
        Err(err) => Err(CallError::Join(err)),
    }
}
