//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQL details from service orchestration.
//! - Classify SQLite constraint failures into `ConstraintKind`.
//!
//! # Invariants
//! - Write paths validate drafts before any SQL mutation.
//! - Repositories never open transactions; they run inside the caller's
//!   session (`&Transaction` derefs to `&Connection`).
//! - Missing update/delete targets surface as `RepoError::NotFound`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::{ffi, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod agent_repo;
pub mod client_repo;
pub mod payment_repo;
pub mod property_repo;
pub mod room_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Which storage rule rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Duplicate value in a unique column (agent email).
    Unique,
    /// Missing referenced row, or a row still referenced by dependents.
    ForeignKey,
    /// `CHECK` / `NOT NULL` rule.
    Check,
    Other,
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Unique => "a record with the same unique value already exists",
            Self::ForeignKey => "a referenced record does not exist or is still in use",
            Self::Check => "a value is outside its allowed range",
            Self::Other => "a storage constraint was violated",
        };
        f.write_str(text)
    }
}

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Constraint(ConstraintKind),
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Constraint(kind) => write!(f, "constraint violation: {kind}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match classify_constraint(&value) {
            Some(kind) => Self::Constraint(kind),
            None => Self::Db(DbError::Sqlite(value)),
        }
    }
}

/// Maps SQLite extended result codes onto `ConstraintKind`.
///
/// Returns `None` for anything that is not a constraint failure.
pub fn classify_constraint(err: &rusqlite::Error) -> Option<ConstraintKind> {
    let rusqlite::Error::SqliteFailure(failure, _) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }

    let kind = match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::Unique,
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
        ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::Check,
        _ => ConstraintKind::Other,
    };
    Some(kind)
}

/// Escapes `%`, `_` and `\` so `fragment` matches literally inside
/// `LIKE ? ESCAPE '\'`.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn ensure_connection_ready(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}
