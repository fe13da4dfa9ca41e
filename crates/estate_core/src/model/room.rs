//! Room domain model.

use super::property::PropertyId;
use super::{require_non_negative, require_text, ValidationError};
use serde::Serialize;

pub type RoomId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    /// Free-text category, stored as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub size: f64,
    pub property_id: PropertyId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub kind: String,
    pub size: f64,
    pub property_id: PropertyId,
}

impl NewRoom {
    pub fn new(kind: &str, size: f64, property_id: PropertyId) -> Self {
        Self {
            kind: kind.trim().to_string(),
            size,
            property_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("room type", &self.kind)?;
        require_non_negative("size", self.size)
    }
}
