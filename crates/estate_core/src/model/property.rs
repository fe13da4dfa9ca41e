//! Property domain model.
//!
//! # Invariants
//! - Every property belongs to exactly one agent (`agent_id`).
//! - Only `address` and `location` are mutable after creation.

use super::agent::AgentId;
use super::{require_text, ValidationError};
use serde::Serialize;

pub type PropertyId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub location: String,
    pub agent_id: AgentId,
}

impl Property {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("address", &self.address)?;
        require_text("location", &self.location)
    }

    /// Applies the `Some` fields of `patch`, trimmed.
    pub fn apply(&mut self, patch: &PropertyPatch) {
        if let Some(address) = patch.address.as_deref() {
            self.address = address.trim().to_string();
        }
        if let Some(location) = patch.location.as_deref() {
            self.location = location.trim().to_string();
        }
    }
}

/// Insert payload for a new property.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub address: String,
    pub location: String,
    pub agent_id: AgentId,
}

impl NewProperty {
    pub fn new(address: &str, location: &str, agent_id: AgentId) -> Self {
        Self {
            address: address.trim().to_string(),
            location: location.trim().to_string(),
            agent_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("address", &self.address)?;
        require_text("location", &self.location)
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPatch {
    pub address: Option<String>,
    pub location: Option<String>,
}
