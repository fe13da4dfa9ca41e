//! Core use-case services.
//!
//! # Responsibility
//! - Own the operation boundary: parse input, open one session, call
//!   repositories, commit or roll back.
//! - Translate every failure into `ServiceError`.
//! - Keep CLI layers decoupled from storage details.
//!
//! # Invariants
//! - Each public operation uses exactly one session.
//! - Parse and validation failures return before a session is opened.
//! - Log events carry ids and error kinds only.

use crate::db::SessionFactory;
use crate::repo::RepoError;
use error::{ServiceError, ServiceResult};
use log::{error, info, warn};
use rusqlite::Transaction;

pub mod agent_service;
pub mod client_service;
pub mod error;
pub mod input;
pub mod payment_service;
pub mod property_service;

/// Runs `work` in a session with the error type pinned to `ServiceError`.
pub(crate) fn in_session<T>(
    sessions: &SessionFactory,
    operation: &'static str,
    work: impl FnOnce(&Transaction<'_>) -> ServiceResult<T>,
) -> ServiceResult<T> {
    sessions.with_session(operation, work)
}

/// Emits the single outcome event for a service operation.
pub(crate) fn log_outcome<T>(
    event: &'static str,
    result: &ServiceResult<T>,
    fields: impl FnOnce(&T) -> String,
) {
    match result {
        Ok(value) => info!("event={event} module=service status=ok {}", fields(value)),
        Err(err) if err.is_recoverable() => warn!(
            "event={event} module=service status=error error_kind={}",
            err.kind().as_str()
        ),
        Err(err) => error!(
            "event={event} module=service status=error error_kind={} error={}",
            err.kind().as_str(),
            err
        ),
    }
}

pub(crate) fn read_back_missing(what: &str) -> ServiceError {
    ServiceError::Storage(RepoError::InvalidData(format!(
        "{what} not found in read-back"
    )))
}
