//! Core domain logic for the incident service.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{Database, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::incident::{
    validate_source, validate_status, validate_text, Incident, IncidentId, IncidentSource,
    IncidentStatus, NewIncident, ValidationError,
};
pub use repo::incident_repo::{
    IncidentRepository, RepoError, RepoResult, SqliteIncidentRepository,
};
pub use service::incident_service::{
    CreateIncident, IncidentDto, IncidentService, ServiceError, StatusUpdateOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
