//! Agent domain model.
//!
//! # Invariants
//! - `email` is unique across all agents, compared case-insensitively.
//! - `hashed_password` is a salted bcrypt hash, never plaintext.

use super::{require_email, require_text, ValidationError};
use crate::credential::PasswordHash;
use serde::Serialize;

pub type AgentId = i64;

/// Registered user who manages properties and clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub hashed_password: PasswordHash,
}

/// Insert payload for a new agent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub name: String,
    pub email: String,
    pub hashed_password: PasswordHash,
}

impl NewAgent {
    /// Builds a draft with trimmed text fields.
    pub fn new(name: &str, email: &str, hashed_password: PasswordHash) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            hashed_password,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_email(&self.email)
    }
}
