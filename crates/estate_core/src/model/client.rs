//! Client domain model.
//!
//! # Invariants
//! - A client references one agent and one property.
//! - Only `name` and `email` are mutable after creation.
//! - Client emails are not unique; several clients may share one.

use super::agent::AgentId;
use super::property::PropertyId;
use super::{require_email, require_text, ValidationError};
use crate::credential::PasswordHash;
use serde::Serialize;

pub type ClientId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub hashed_password: PasswordHash,
    pub agent_id: AgentId,
    pub property_id: PropertyId,
}

impl Client {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_email(&self.email)
    }

    /// Applies the `Some` fields of `patch`, trimmed.
    pub fn apply(&mut self, patch: &ClientPatch) {
        if let Some(name) = patch.name.as_deref() {
            self.name = name.trim().to_string();
        }
        if let Some(email) = patch.email.as_deref() {
            self.email = email.trim().to_string();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub hashed_password: PasswordHash,
    pub agent_id: AgentId,
    pub property_id: PropertyId,
}

impl NewClient {
    pub fn new(
        name: &str,
        email: &str,
        hashed_password: PasswordHash,
        agent_id: AgentId,
        property_id: PropertyId,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            hashed_password,
            agent_id,
            property_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_email(&self.email)
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}
