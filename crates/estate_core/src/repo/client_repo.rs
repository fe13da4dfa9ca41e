//! Client repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `clients` plus name/email search.
//!
//! # Invariants
//! - Search is a literal, case-insensitive substring match; `%` and `_` in
//!   the fragment carry no wildcard meaning.
//! - Deleting a client that still has payments fails with a foreign-key
//!   constraint at commit; nothing cascades.

use super::{ensure_connection_ready, like_pattern, RepoError, RepoResult};
use crate::credential::PasswordHash;
use crate::model::client::{Client, ClientId, NewClient};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLIENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    hashed_password,
    agent_id,
    property_id
FROM clients";

/// Repository interface for client persistence and search.
pub trait ClientRepository {
    fn create_client(&self, client: &NewClient) -> RepoResult<ClientId>;
    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>>;
    fn list_clients(&self) -> RepoResult<Vec<Client>>;
    fn update_client(&self, client: &Client) -> RepoResult<()>;
    fn delete_client(&self, id: ClientId) -> RepoResult<()>;
    fn search_clients(&self, fragment: &str) -> RepoResult<Vec<Client>>;
}

/// SQLite-backed client repository.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "clients")?;
        Ok(Self { conn })
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn create_client(&self, client: &NewClient) -> RepoResult<ClientId> {
        client.validate()?;

        self.conn.execute(
            "INSERT INTO clients (
                name,
                email,
                hashed_password,
                agent_id,
                property_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                client.name.as_str(),
                client.email.as_str(),
                client.hashed_password.as_str(),
                client.agent_id,
                client.property_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let client = self
            .conn
            .query_row(
                &format!("{CLIENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_client_row,
            )
            .optional()?;
        Ok(client)
    }

    fn list_clients(&self) -> RepoResult<Vec<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let clients = stmt
            .query_map([], parse_client_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clients)
    }

    fn update_client(&self, client: &Client) -> RepoResult<()> {
        client.validate()?;

        let changed = self.conn.execute(
            "UPDATE clients
             SET
                name = ?1,
                email = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![client.name.as_str(), client.email.as_str(), client.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "client",
                id: client.id,
            });
        }

        Ok(())
    }

    fn delete_client(&self, id: ClientId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM clients WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "client",
                id,
            });
        }
        Ok(())
    }

    fn search_clients(&self, fragment: &str) -> RepoResult<Vec<Client>> {
        let pattern = like_pattern(fragment.trim());
        let mut stmt = self.conn.prepare(&format!(
            "{CLIENT_SELECT_SQL}
             WHERE name LIKE ?1 ESCAPE '\\'
                OR email LIKE ?1 ESCAPE '\\'
             ORDER BY id ASC;"
        ))?;
        let clients = stmt
            .query_map([pattern], parse_client_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clients)
    }
}

fn parse_client_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        hashed_password: PasswordHash::from_stored(row.get::<_, String>("hashed_password")?),
        agent_id: row.get("agent_id")?,
        property_id: row.get("property_id")?,
    })
}
