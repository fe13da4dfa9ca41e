//! Property repository contracts and SQLite implementation.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::property::{NewProperty, Property, PropertyId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROPERTY_SELECT_SQL: &str = "SELECT id, address, location, agent_id FROM properties";

/// Repository interface for property persistence.
pub trait PropertyRepository {
    fn create_property(&self, property: &NewProperty) -> RepoResult<PropertyId>;
    fn get_property(&self, id: PropertyId) -> RepoResult<Option<Property>>;
    fn list_properties(&self) -> RepoResult<Vec<Property>>;
    fn update_property(&self, property: &Property) -> RepoResult<()>;
}

/// SQLite-backed property repository.
pub struct SqlitePropertyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePropertyRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "properties")?;
        Ok(Self { conn })
    }
}

impl PropertyRepository for SqlitePropertyRepository<'_> {
    fn create_property(&self, property: &NewProperty) -> RepoResult<PropertyId> {
        property.validate()?;

        self.conn.execute(
            "INSERT INTO properties (address, location, agent_id) VALUES (?1, ?2, ?3);",
            params![
                property.address.as_str(),
                property.location.as_str(),
                property.agent_id
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_property(&self, id: PropertyId) -> RepoResult<Option<Property>> {
        let property = self
            .conn
            .query_row(
                &format!("{PROPERTY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_property_row,
            )
            .optional()?;
        Ok(property)
    }

    fn list_properties(&self) -> RepoResult<Vec<Property>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROPERTY_SELECT_SQL} ORDER BY id ASC;"))?;
        let properties = stmt
            .query_map([], parse_property_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(properties)
    }

    fn update_property(&self, property: &Property) -> RepoResult<()> {
        property.validate()?;

        let changed = self.conn.execute(
            "UPDATE properties
             SET
                address = ?1,
                location = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![
                property.address.as_str(),
                property.location.as_str(),
                property.id
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "property",
                id: property.id,
            });
        }

        Ok(())
    }
}

fn parse_property_row(row: &Row<'_>) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get("id")?,
        address: row.get("address")?,
        location: row.get("location")?,
        agent_id: row.get("agent_id")?,
    })
}
