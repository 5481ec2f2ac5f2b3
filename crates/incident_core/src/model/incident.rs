//! Incident domain model and validation rules.
//!
//! # Responsibility
//! - Define the closed `status` / `source` enumerations.
//! - Own the single normalize/parse routine every layer defers to.
//!
//! # Invariants
//! - `status` and `source` are always members of their enumerations.
//! - Canonical strings here must match the `incidents` table check constraints.
//! - `text` is non-empty after trimming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned row identifier.
pub type IncidentId = i64;

/// Mutable lifecycle state of an incident.
///
/// Any value may transition to any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncidentStatus {
    Pending,
    InProgress,
    Solved,
}

/// Immutable origin tag of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncidentSource {
    Operator,
    Monitoring,
    Partner,
}

impl IncidentStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Solved];

    /// Canonical storage/wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Solved => "solved",
        }
    }
}

impl IncidentSource {
    pub const ALL: [Self; 3] = [Self::Operator, Self::Monitoring, Self::Partner];

    /// Canonical storage/wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Monitoring => "monitoring",
            Self::Partner => "partner",
        }
    }
}

/// Validation failures raised before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Carries the caller input verbatim.
    InvalidStatus(String),
    /// Carries the caller input verbatim.
    InvalidSource(String),
    EmptyText,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status: '{value}'. allowed values: {}",
                allowed_list(IncidentStatus::ALL.iter().map(|status| status.as_str()))
            ),
            Self::InvalidSource(value) => write!(
                f,
                "invalid source: '{value}'. allowed values: {}",
                allowed_list(IncidentSource::ALL.iter().map(|source| source.as_str()))
            ),
            Self::EmptyText => write!(f, "incident text cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Normalizes `value` (trimmed, case-insensitive) into a status.
pub fn validate_status(value: &str) -> Result<IncidentStatus, ValidationError> {
    let normalized = value.trim().to_lowercase();
    IncidentStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == normalized)
        .ok_or_else(|| ValidationError::InvalidStatus(value.to_string()))
}

/// Normalizes `value` (trimmed, case-insensitive) into a source.
pub fn validate_source(value: &str) -> Result<IncidentSource, ValidationError> {
    let normalized = value.trim().to_lowercase();
    IncidentSource::ALL
        .into_iter()
        .find(|source| source.as_str() == normalized)
        .ok_or_else(|| ValidationError::InvalidSource(value.to_string()))
}

/// Rejects blank descriptions. Returns the input unchanged otherwise.
pub fn validate_text(value: &str) -> Result<&str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(value)
}

fn allowed_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

impl Display for IncidentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for IncidentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_status(value)
    }
}

impl FromStr for IncidentSource {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_source(value)
    }
}

impl Serialize for IncidentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IncidentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        validate_status(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for IncidentSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IncidentSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        validate_source(&raw).map_err(serde::de::Error::custom)
    }
}

/// Insert shape for a not-yet-persisted incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    pub text: String,
    pub status: IncidentStatus,
    pub source: IncidentSource,
    pub created_at: DateTime<Utc>,
}

impl NewIncident {
    /// Builds an insert record stamped with the current UTC time.
    pub fn new(text: impl Into<String>, status: IncidentStatus, source: IncidentSource) -> Self {
        Self {
            text: text.into(),
            status,
            source,
            created_at: Utc::now(),
        }
    }
}

/// Persisted incident row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    /// Assigned by the store on insert, immutable afterward.
    pub id: IncidentId,
    pub text: String,
    /// Mutable only through the status-update path.
    pub status: IncidentStatus,
    /// Fixed at creation.
    pub source: IncidentSource,
    pub created_at: DateTime<Utc>,
}
