//! Scoped unit-of-work over the process-owned connection.
//!
//! # Responsibility
//! - Own the bootstrapped connection for the lifetime of the process.
//! - Run each operation inside exactly one transaction.
//!
//! # Invariants
//! - `work` returning `Ok` commits; `Err` or a failed commit rolls back.
//! - The transaction is released on every exit path, unwinding included,
//!   because `Transaction` rolls back on drop.
//! - Sessions do not nest. SQLite rejects a second `BEGIN` on the same
//!   connection and the caller gets that error back.

use super::{open_db, open_db_in_memory, DbResult};
use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Instant;

/// Session handle created once by the process entry point.
pub struct SessionFactory {
    conn: Connection,
}

impl SessionFactory {
    /// Opens (or creates) the database file and applies the schema.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database. Data lives as long as the factory.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps a connection returned by [`open_db`] or [`open_db_in_memory`].
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Read-only access for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs `work` inside one IMMEDIATE transaction.
    ///
    /// `operation` is only used as a log label.
    pub fn with_session<T, E, F>(&self, operation: &'static str, work: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<rusqlite::Error>,
    {
        let started_at = Instant::now();
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        match work(&tx) {
            Ok(value) => match tx.commit() {
                Ok(()) => {
                    debug!(
                        "event=session module=db status=commit op={} duration_ms={}",
                        operation,
                        started_at.elapsed().as_millis()
                    );
                    Ok(value)
                }
                Err(err) => {
                    warn!(
                        "event=session module=db status=rollback op={} stage=commit duration_ms={} error={}",
                        operation,
                        started_at.elapsed().as_millis(),
                        err
                    );
                    Err(err.into())
                }
            },
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=session module=db status=rollback_failed op={} error={}",
                        operation, rollback_err
                    );
                }
                debug!(
                    "event=session module=db status=rollback op={} stage=work duration_ms={}",
                    operation,
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionFactory;

    #[test]
    fn commit_persists_and_error_rolls_back() {
        let sessions = SessionFactory::open_in_memory().unwrap();

        sessions
            .with_session("seed", |tx| {
                tx.execute(
                    "INSERT INTO agents (name, email, hashed_password) VALUES ('a', 'a@x.com', 'h');",
                    [],
                )
                .map(|_| ())
            })
            .unwrap();

        let result: Result<(), rusqlite::Error> = sessions.with_session("aborted", |tx| {
            tx.execute(
                "INSERT INTO agents (name, email, hashed_password) VALUES ('b', 'b@x.com', 'h');",
                [],
            )?;
            Err(rusqlite::Error::QueryReturnedNoRows)
        });
        assert!(result.is_err());

        let count: i64 = sessions
            .connection()
            .query_row("SELECT COUNT(*) FROM agents;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn nested_session_is_rejected() {
        let sessions = SessionFactory::open_in_memory().unwrap();

        let outer: Result<(), rusqlite::Error> =
            sessions.with_session("outer", |_| sessions.with_session("inner", |_| Ok(())));
        assert!(outer.is_err());

        let after: Result<(), rusqlite::Error> = sessions.with_session("after", |_| Ok(()));
        assert!(after.is_ok());
    }
}
