//! Failure taxonomy at the operation boundary.
//!
//! # Responsibility
//! - Fold repository, credential and parse failures into one error type.
//! - Render every failure as a human-readable line for the caller.
//!
//! # Invariants
//! - Only `Storage` is non-recoverable; every other kind leaves the caller
//!   free to issue the next command.
//! - Messages never contain passwords or hashes.

use crate::credential::CredentialError;
use crate::date::DateParseError;
use crate::model::ValidationError;
use crate::repo::{ConstraintKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse failure class, stable for callers and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConstraintViolation,
    InvalidFormat,
    NotFound,
    MalformedInput,
    InvalidCredentials,
    Storage,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConstraintViolation => "constraint_violation",
            Self::InvalidFormat => "invalid_format",
            Self::NotFound => "not_found",
            Self::MalformedInput => "malformed_input",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Storage => "storage",
        }
    }
}

#[derive(Debug)]
pub enum ServiceError {
    /// Unique, foreign-key or check rule rejected the write; rolled back.
    ConstraintViolation(ConstraintKind),
    /// Date/number did not parse or a field failed validation.
    InvalidFormat(String),
    /// Update/delete target is missing.
    NotFound { entity: &'static str, id: i64 },
    /// Non-numeric text where an id is required.
    MalformedInput(String),
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// Connectivity, schema or corrupt-row failure.
    Storage(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Storage
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConstraintViolation(ConstraintKind::Unique) => {
                write!(f, "That email already exists. Please try a different email.")
            }
            Self::ConstraintViolation(ConstraintKind::ForeignKey) => write!(
                f,
                "Operation rejected: a referenced record does not exist, or the record is still referenced by others."
            ),
            Self::ConstraintViolation(kind) => write!(f, "Operation rejected: {kind}."),
            Self::InvalidFormat(details) => write!(f, "Invalid input: {details}."),
            Self::NotFound { entity, id } => {
                let mut label = entity.to_string();
                if let Some(first) = label.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                write!(f, "{label} ID {id} not found.")
            }
            Self::MalformedInput(details) => write!(f, "Malformed input: {details}."),
            Self::InvalidCredentials => write!(f, "Invalid email or password. Please try again."),
            Self::Storage(err) => write!(f, "Storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Constraint(kind) => Self::ConstraintViolation(kind),
            RepoError::Validation(err) => Self::InvalidFormat(err.to_string()),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Storage(other),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::from(RepoError::from(value))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidFormat(value.to_string())
    }
}

impl From<DateParseError> for ServiceError {
    fn from(value: DateParseError) -> Self {
        Self::InvalidFormat(value.to_string())
    }
}

impl From<CredentialError> for ServiceError {
    fn from(value: CredentialError) -> Self {
        Self::InvalidFormat(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ServiceError};
    use crate::repo::{ConstraintKind, RepoError};

    #[test]
    fn repo_errors_fold_into_taxonomy() {
        let cases = [
            (
                RepoError::Constraint(ConstraintKind::Unique),
                ErrorKind::ConstraintViolation,
            ),
            (
                RepoError::NotFound {
                    entity: "room",
                    id: 4,
                },
                ErrorKind::NotFound,
            ),
            (
                RepoError::InvalidData("bad row".to_string()),
                ErrorKind::Storage,
            ),
        ];
        for (repo_err, expected) in cases {
            assert_eq!(ServiceError::from(repo_err).kind(), expected);
        }
    }

    #[test]
    fn only_storage_is_fatal() {
        assert!(ServiceError::InvalidCredentials.is_recoverable());
        assert!(ServiceError::MalformedInput("id".to_string()).is_recoverable());
        assert!(!ServiceError::Storage(RepoError::MissingRequiredTable("agents")).is_recoverable());
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = ServiceError::NotFound {
            entity: "client",
            id: 12,
        };
        assert_eq!(err.to_string(), "Client ID 12 not found.");
    }
}
