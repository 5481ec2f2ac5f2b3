//! Deterministic demo data for local runs.
//!
//! Ten "Scooter N is offline" incidents timestamped 2025-11-09 10:30:NN.

use crate::db::DbResult;
use crate::model::incident::{IncidentSource, IncidentStatus, NewIncident};
use crate::repo::incident_repo::{IncidentRepository, RepoResult, SqliteIncidentRepository};
use chrono::{TimeZone, Utc};
use log::info;
use rusqlite::Connection;

const DEMO_INCIDENT_COUNT: u32 = 10;

/// Builds the demo rows in insertion order.
pub fn demo_incidents() -> Vec<NewIncident> {
    (1..=DEMO_INCIDENT_COUNT)
        .map(|n| {
            let status = match n {
                1..=2 => IncidentStatus::Solved,
                3..=5 => IncidentStatus::InProgress,
                _ => IncidentStatus::Pending,
            };
            let source = if n % 2 == 0 {
                IncidentSource::Monitoring
            } else {
                IncidentSource::Partner
            };
            NewIncident {
                text: format!("Scooter {n} is offline!"),
                status,
                source,
                created_at: Utc
                    .with_ymd_and_hms(2025, 11, 9, 10, 30, n)
                    .single()
                    .unwrap_or_else(Utc::now),
            }
        })
        .collect()
}

/// Inserts the demo rows when `incidents` is empty. Returns rows inserted.
pub fn seed_demo_incidents(conn: &Connection) -> RepoResult<usize> {
    if incident_count(conn)? > 0 {
        info!("event=db_seed module=db status=skipped reason=not_empty");
        return Ok(0);
    }

    let tx = conn.unchecked_transaction()?;
    let repo = SqliteIncidentRepository::new(&tx);
    let incidents = demo_incidents();
    for incident in &incidents {
        repo.create_incident(incident)?;
    }
    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok inserted={}",
        incidents.len()
    );
    Ok(incidents.len())
}

fn incident_count(conn: &Connection) -> DbResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM incidents;", [], |row| row.get(0))?;
    Ok(count)
}
