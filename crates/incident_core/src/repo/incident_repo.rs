//! Incident repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/update-status APIs over the `incidents` table.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `list_by_status` returns rows in insertion (`id`) order.

use crate::db::DbError;
use crate::model::incident::{
    validate_source, validate_status, Incident, IncidentId, IncidentStatus, NewIncident,
};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INCIDENT_SELECT_SQL: &str = "SELECT
    id,
    text,
    status,
    source,
    created_at
FROM incidents";

/// Format written by the store's `CURRENT_TIMESTAMP` default.
const STORE_DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for incident persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(IncidentId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "incident not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted incident data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for incident persistence.
pub trait IncidentRepository {
    /// Inserts one row and returns the store-assigned id.
    fn create_incident(&self, incident: &NewIncident) -> RepoResult<IncidentId>;
    /// Returns every incident with `status`, possibly none.
    fn list_by_status(&self, status: IncidentStatus) -> RepoResult<Vec<Incident>>;
    /// Fails with `RepoError::NotFound` when `id` does not exist.
    fn update_status(&self, id: IncidentId, status: IncidentStatus) -> RepoResult<()>;
}

/// SQLite-backed incident repository.
///
/// Borrows a connection or transaction for one unit of work; commit and
/// rollback belong to the caller that owns the transaction.
pub struct SqliteIncidentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIncidentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl IncidentRepository for SqliteIncidentRepository<'_> {
    fn create_incident(&self, incident: &NewIncident) -> RepoResult<IncidentId> {
        self.conn.execute(
            "INSERT INTO incidents (
                text,
                status,
                source,
                created_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                incident.text.as_str(),
                incident.status.as_str(),
                incident.source.as_str(),
                timestamp_to_db(incident.created_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_by_status(&self, status: IncidentStatus) -> RepoResult<Vec<Incident>> {
        let mut stmt = self.conn.prepare(&format!(
            "{INCIDENT_SELECT_SQL}
             WHERE status = ?1
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query([status.as_str()])?;
        let mut incidents = Vec::new();
        while let Some(row) = rows.next()? {
            incidents.push(parse_incident_row(row)?);
        }

        Ok(incidents)
    }

    fn update_status(&self, id: IncidentId, status: IncidentStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE incidents SET status = ?1 WHERE id = ?2;",
            params![status.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_incident_row(row: &Row<'_>) -> RepoResult<Incident> {
    let id: IncidentId = row.get("id")?;

    let status_text: String = row.get("status")?;
    let status = validate_status(&status_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in incidents.status (id={id})"
        ))
    })?;

    let source_text: String = row.get("source")?;
    let source = validate_source(&source_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid source `{source_text}` in incidents.source (id={id})"
        ))
    })?;

    let created_at = match row.get::<_, Option<String>>("created_at")? {
        Some(value) => parse_timestamp(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{value}` in incidents.created_at (id={id})"
            ))
        })?,
        None => {
            return Err(RepoError::InvalidData(format!(
                "missing incidents.created_at (id={id})"
            )));
        }
    };

    Ok(Incident {
        id,
        text: row.get("text")?,
        status,
        source,
        created_at,
    })
}

pub(crate) fn timestamp_to_db(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, STORE_DEFAULT_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
