//! Property and room use-cases.
//!
//! # Invariants
//! - `update_property` on a missing id is a no-op reporting `NotFound`.
//! - Room sizes are parsed and validated before a session opens.

use super::error::{ServiceError, ServiceResult};
use super::input::parse_amount;
use super::{in_session, log_outcome, read_back_missing};
use crate::db::SessionFactory;
use crate::model::property::{NewProperty, Property, PropertyId, PropertyPatch};
use crate::model::room::{NewRoom, Room, RoomId};
use crate::repo::property_repo::{PropertyRepository, SqlitePropertyRepository};
use crate::repo::room_repo::{RoomRepository, SqliteRoomRepository};

/// Use-case service for properties and their rooms.
pub struct PropertyService<'s> {
    sessions: &'s SessionFactory,
}

impl<'s> PropertyService<'s> {
    pub fn new(sessions: &'s SessionFactory) -> Self {
        Self { sessions }
    }

    /// Creates a property owned by `draft.agent_id`.
    ///
    /// A missing agent surfaces as `ConstraintViolation` at commit.
    pub fn add_property(&self, draft: &NewProperty) -> ServiceResult<Property> {
        let result = draft.validate().map_err(ServiceError::from).and_then(|()| {
            in_session(self.sessions, "property_add", |tx| {
                let repo = SqlitePropertyRepository::try_new(tx)?;
                let id = repo.create_property(draft)?;
                repo.get_property(id)?
                    .ok_or_else(|| read_back_missing("created property"))
            })
        });
        log_outcome("property_add", &result, |property| {
            format!(
                "property_id={} agent_id={}",
                property.id, property.agent_id
            )
        });
        result
    }

    pub fn get_property(&self, id: PropertyId) -> ServiceResult<Option<Property>> {
        in_session(self.sessions, "property_get", |tx| {
            Ok(SqlitePropertyRepository::try_new(tx)?.get_property(id)?)
        })
    }

    pub fn list_properties(&self) -> ServiceResult<Vec<Property>> {
        in_session(self.sessions, "property_list", |tx| {
            Ok(SqlitePropertyRepository::try_new(tx)?.list_properties()?)
        })
    }

    /// Applies `patch` to an existing property and returns the stored result.
    pub fn update_property(
        &self,
        id: PropertyId,
        patch: &PropertyPatch,
    ) -> ServiceResult<Property> {
        let result = in_session(self.sessions, "property_update", |tx| {
            let repo = SqlitePropertyRepository::try_new(tx)?;
            let mut property = repo.get_property(id)?.ok_or(ServiceError::NotFound {
                entity: "property",
                id,
            })?;
            property.apply(patch);
            repo.update_property(&property)?;
            Ok(property)
        });
        log_outcome("property_update", &result, |property| {
            format!("property_id={}", property.id)
        });
        result
    }

    /// Adds a room; `size_text` must parse as a non-negative number.
    pub fn add_room(
        &self,
        kind: &str,
        size_text: &str,
        property_id: PropertyId,
    ) -> ServiceResult<Room> {
        let result = parse_amount(size_text, "size").and_then(|size| {
            let draft = NewRoom::new(kind, size, property_id);
            draft.validate()?;
            in_session(self.sessions, "room_add", |tx| {
                let repo = SqliteRoomRepository::try_new(tx)?;
                let id = repo.create_room(&draft)?;
                repo.get_room(id)?
                    .ok_or_else(|| read_back_missing("created room"))
            })
        });
        log_outcome("room_add", &result, |room| {
            format!("room_id={} property_id={}", room.id, room.property_id)
        });
        result
    }

    pub fn get_room(&self, id: RoomId) -> ServiceResult<Option<Room>> {
        in_session(self.sessions, "room_get", |tx| {
            Ok(SqliteRoomRepository::try_new(tx)?.get_room(id)?)
        })
    }

    pub fn list_rooms(&self) -> ServiceResult<Vec<Room>> {
        in_session(self.sessions, "room_list", |tx| {
            Ok(SqliteRoomRepository::try_new(tx)?.list_rooms()?)
        })
    }

    pub fn list_rooms_for_property(&self, property_id: PropertyId) -> ServiceResult<Vec<Room>> {
        in_session(self.sessions, "room_list_for_property", |tx| {
            Ok(SqliteRoomRepository::try_new(tx)?.list_rooms_for_property(property_id)?)
        })
    }

    pub fn delete_room(&self, id: RoomId) -> ServiceResult<()> {
        let result = in_session(self.sessions, "room_delete", |tx| {
            Ok(SqliteRoomRepository::try_new(tx)?.delete_room(id)?)
        });
        log_outcome("room_delete", &result, |_| format!("room_id={id}"));
        result
    }
}
