//! Domain model for agents, properties, rooms, clients and payments.
//!
//! # Responsibility
//! - Define the records exchanged between repositories, services and callers.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Every persisted record is identified by a numeric id assigned by storage.
//! - Required text fields are trimmed and never blank.
//! - Numeric measures (`Room::size`, `Payment::amount`) are finite and
//!   non-negative.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod agent;
pub mod client;
pub mod payment;
pub mod property;
pub mod room;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Field-level validation failure raised before any SQL runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    BlankField(&'static str),
    /// Email does not look like `local@domain`.
    InvalidEmail(String),
    /// Numeric field is negative, NaN or infinite.
    OutOfRange { field: &'static str, value: f64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be empty"),
            Self::InvalidEmail(value) => write!(f, "`{value}` is not a valid email address"),
            Self::OutOfRange { field, value } => {
                write!(f, "{field} must be a non-negative number, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    require_text("email", value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidEmail(value.trim().to_string()));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_email, require_non_negative, require_text, ValidationError};

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            require_text("name", "   "),
            Err(ValidationError::BlankField("name"))
        );
        assert!(require_text("name", "Ana").is_ok());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(require_email("a@x.com").is_ok());
        assert!(require_email(" a@x.com ").is_ok());
        assert!(matches!(
            require_email("no-at-sign"),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(matches!(
            require_email("two@@x.com"),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn measures_must_be_finite_and_non_negative() {
        assert!(require_non_negative("size", 0.0).is_ok());
        assert!(require_non_negative("size", 12.5).is_ok());
        assert!(require_non_negative("size", -1.0).is_err());
        assert!(require_non_negative("size", f64::NAN).is_err());
        assert!(require_non_negative("size", f64::INFINITY).is_err());
    }
}
