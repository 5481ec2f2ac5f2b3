//! Incident use-case service.
//!
//! # Responsibility
//! - Validate caller input before any repository access.
//! - Translate repository outcomes into the result codes callers expect.
//!
//! # Invariants
//! - Validation failures never reach the repository.
//! - A missing status filter is invalid input; defaulting is the caller's job.
//! - `NotFound` on update becomes `StatusUpdateOutcome::NotFound`, never an error.
//! - Service layer remains storage-agnostic.

use crate::db::DbError;
use crate::model::incident::{
    validate_source, validate_status, validate_text, Incident, IncidentId, IncidentSource,
    IncidentStatus, NewIncident, ValidationError,
};
use crate::repo::incident_repo::{IncidentRepository, RepoError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for incident use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Bad caller input; reported before storage is touched.
    Validation(ValidationError),
    /// Unexpected persistence failure. Not retried.
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Storage(RepoError::Db(value))
    }
}

/// Result of a status update.
///
/// Discriminants are the numeric codes exposed to the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StatusUpdateOutcome {
    Updated = 0,
    NotFound = 2,
}

impl StatusUpdateOutcome {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Raw create input as received from the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIncident {
    pub text: String,
    pub status: String,
    pub source: String,
}

/// Outward incident shape returned to service callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentDto {
    pub id: IncidentId,
    pub text: String,
    pub status: IncidentStatus,
    pub source: IncidentSource,
    /// RFC 3339 on the wire.
    pub created_at: DateTime<Utc>,
}

impl From<Incident> for IncidentDto {
    fn from(value: Incident) -> Self {
        Self {
            id: value.id,
            text: value.text,
            status: value.status,
            source: value.source,
            created_at: value.created_at,
        }
    }
}

/// Incident service facade over repository implementations.
pub struct IncidentService<R: IncidentRepository> {
    repo: R,
}

impl<R: IncidentRepository> IncidentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists one incident stamped with the current time.
    ///
    /// Returns the store-assigned id.
    pub fn create_incident(&self, request: &CreateIncident) -> Result<IncidentId, ServiceError> {
        let text = validate_text(&request.text)?;
        let status = validate_status(&request.status)?;
        let source = validate_source(&request.source)?;

        let id = self
            .repo
            .create_incident(&NewIncident::new(text, status, source))?;
        info!(
            "event=incident_create module=service status=ok id={} incident_status={} source={}",
            id, status, source
        );
        Ok(id)
    }

    /// Lists incidents with the given status, possibly none.
    ///
    /// # Errors
    /// - `None` and unknown values fail with `ValidationError::InvalidStatus`.
    pub fn get_incidents(&self, status: Option<&str>) -> Result<Vec<IncidentDto>, ServiceError> {
        let status = validate_status(status.unwrap_or_default())?;
        let incidents = self.repo.list_by_status(status)?;
        Ok(incidents.into_iter().map(IncidentDto::from).collect())
    }

    /// Moves incident `id` to `new_status`.
    ///
    /// Any status may move to any other; repeating the same update is a no-op
    /// that still reports `Updated`.
    pub fn update_status(
        &self,
        id: IncidentId,
        new_status: &str,
    ) -> Result<StatusUpdateOutcome, ServiceError> {
        let status = validate_status(new_status)?;

        match self.repo.update_status(id, status) {
            Ok(()) => {
                info!(
                    "event=incident_update_status module=service status=ok id={} incident_status={}",
                    id, status
                );
                Ok(StatusUpdateOutcome::Updated)
            }
            Err(RepoError::NotFound(_)) => {
                warn!(
                    "event=incident_update_status module=service status=not_found id={}",
                    id
                );
                Ok(StatusUpdateOutcome::NotFound)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StatusUpdateOutcome;

    #[test]
    fn outcome_codes_are_stable() {
        assert_eq!(StatusUpdateOutcome::Updated.code(), 0);
        assert_eq!(StatusUpdateOutcome::NotFound.code(), 2);
    }
}
