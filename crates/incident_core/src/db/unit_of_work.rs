//! Per-request connection and transaction scope.
//!
//! # Responsibility
//! - Hand each unit of work its own unshared connection.
//! - Commit on `Ok`, roll back on `Err`, close the connection on every path.
//!
//! # Invariants
//! - No connection outlives the unit of work that opened it.
//! - Only file-backed databases are supported; `:memory:` would give every
//!   unit of work a private, empty store.

use super::open::{configure_connection, open_db};
use super::{DbError, DbResult};
use log::{debug, warn};
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};

/// Cloneable handle to a migrated SQLite database file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Opens `path` once to apply pending migrations, then keeps only the path.
    ///
    /// # Errors
    /// - Returns `DbError` when the file cannot be opened or migrated.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        drop(open_db(&path)?);
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh configured connection. Schema is assumed current.
    pub fn connect(&self) -> DbResult<Connection> {
        let conn = Connection::open(&self.path)?;
        configure_connection(&conn)?;
        Ok(conn)
    }

    /// Runs `work` inside one transaction on a dedicated connection.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back when it
    /// returns `Err` or unwinds. The connection is closed before returning.
    pub fn unit_of_work<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut conn = self.connect().map_err(E::from)?;
        let tx = conn
            .transaction()
            .map_err(|err| E::from(DbError::from(err)))?;

        match work(&tx) {
            Ok(value) => {
                tx.commit().map_err(|err| E::from(DbError::from(err)))?;
                debug!("event=unit_of_work module=db status=ok outcome=commit");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=unit_of_work module=db status=error outcome=rollback_failed error={}",
                        rollback_err
                    );
                } else {
                    debug!("event=unit_of_work module=db status=ok outcome=rollback");
                }
                Err(err)
            }
        }
    }
}
