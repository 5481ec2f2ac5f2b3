//! HTTP boundary for the incident service.
//!
//! # Responsibility
//! - Expose create/list/update-status over JSON HTTP.
//! - Keep routing and serialization out of `incident_core`.
//!
//! # Invariants
//! - Handlers never touch SQL; they go through `IncidentService`.

pub mod dto;
pub mod error;
pub mod handlers;

use axum::routing::{get, patch};
use axum::Router;
use incident_core::Database;

/// Shared router state. Holds only the database handle; connections are
/// opened per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub database: Database,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/incidents",
            get(handlers::list_incidents).post(handlers::create_incident),
        )
        .route(
            "/incidents/",
            get(handlers::list_incidents).post(handlers::create_incident),
        )
        .route("/incidents/:id/status", patch(handlers::update_incident_status))
        .with_state(state)
}
