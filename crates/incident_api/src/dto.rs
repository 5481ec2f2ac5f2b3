//! Request/response bodies for the incident routes.

use incident_core::IncidentStatus;
use serde::{Deserialize, Serialize};

/// `POST /incidents/` body. `status` defaults to `pending`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateIncidentRequest {
    pub text: String,
    pub status: Option<String>,
    pub source: String,
}

impl CreateIncidentRequest {
    pub fn status_or_default(&self) -> &str {
        self.status
            .as_deref()
            .unwrap_or(IncidentStatus::Pending.as_str())
    }
}

/// `GET /incidents/` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListIncidentsQuery {
    pub status: Option<String>,
}

/// `PATCH /incidents/{id}/status` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStatusRequest {
    pub new_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
