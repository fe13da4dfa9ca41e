//! Room repository contracts and SQLite implementation.
//!
//! # Invariants
//! - The model's `kind` maps to the `type` column.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::property::PropertyId;
use crate::model::room::{NewRoom, Room, RoomId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ROOM_SELECT_SQL: &str = "SELECT id, type, size, property_id FROM rooms";

/// Repository interface for room persistence.
pub trait RoomRepository {
    fn create_room(&self, room: &NewRoom) -> RepoResult<RoomId>;
    fn get_room(&self, id: RoomId) -> RepoResult<Option<Room>>;
    fn list_rooms(&self) -> RepoResult<Vec<Room>>;
    fn list_rooms_for_property(&self, property_id: PropertyId) -> RepoResult<Vec<Room>>;
    fn delete_room(&self, id: RoomId) -> RepoResult<()>;
}

/// SQLite-backed room repository.
pub struct SqliteRoomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoomRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "rooms")?;
        Ok(Self { conn })
    }

    fn query_rooms(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Room>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rooms = stmt
            .query_map(params, parse_room_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rooms)
    }
}

impl RoomRepository for SqliteRoomRepository<'_> {
    fn create_room(&self, room: &NewRoom) -> RepoResult<RoomId> {
        room.validate()?;

        self.conn.execute(
            "INSERT INTO rooms (type, size, property_id) VALUES (?1, ?2, ?3);",
            params![room.kind.as_str(), room.size, room.property_id],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_room(&self, id: RoomId) -> RepoResult<Option<Room>> {
        let room = self
            .conn
            .query_row(&format!("{ROOM_SELECT_SQL} WHERE id = ?1;"), [id], parse_room_row)
            .optional()?;
        Ok(room)
    }

    fn list_rooms(&self) -> RepoResult<Vec<Room>> {
        self.query_rooms(&format!("{ROOM_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn list_rooms_for_property(&self, property_id: PropertyId) -> RepoResult<Vec<Room>> {
        self.query_rooms(
            &format!("{ROOM_SELECT_SQL} WHERE property_id = ?1 ORDER BY id ASC;"),
            [property_id],
        )
    }

    fn delete_room(&self, id: RoomId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM rooms WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "room", id });
        }
        Ok(())
    }
}

fn parse_room_row(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get("id")?,
        kind: row.get("type")?,
        size: row.get("size")?,
        property_id: row.get("property_id")?,
    })
}
