//! Agent repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Agents are append-only: no update or delete path exists.
//! - Email lookups are case-insensitive (`COLLATE NOCASE` on the column).

use super::{ensure_connection_ready, RepoResult};
use crate::credential::PasswordHash;
use crate::model::agent::{Agent, AgentId, NewAgent};
use rusqlite::{params, Connection, OptionalExtension, Row};

const AGENT_SELECT_SQL: &str = "SELECT id, name, email, hashed_password FROM agents";

/// Repository interface for agent persistence.
pub trait AgentRepository {
    fn create_agent(&self, agent: &NewAgent) -> RepoResult<AgentId>;
    fn get_agent(&self, id: AgentId) -> RepoResult<Option<Agent>>;
    fn find_agent_by_email(&self, email: &str) -> RepoResult<Option<Agent>>;
    fn list_agents(&self) -> RepoResult<Vec<Agent>>;
}

/// SQLite-backed agent repository.
pub struct SqliteAgentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAgentRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "agents")?;
        Ok(Self { conn })
    }
}

impl AgentRepository for SqliteAgentRepository<'_> {
    fn create_agent(&self, agent: &NewAgent) -> RepoResult<AgentId> {
        agent.validate()?;

        self.conn.execute(
            "INSERT INTO agents (name, email, hashed_password) VALUES (?1, ?2, ?3);",
            params![
                agent.name.as_str(),
                agent.email.as_str(),
                agent.hashed_password.as_str()
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_agent(&self, id: AgentId) -> RepoResult<Option<Agent>> {
        let agent = self
            .conn
            .query_row(&format!("{AGENT_SELECT_SQL} WHERE id = ?1;"), [id], parse_agent_row)
            .optional()?;
        Ok(agent)
    }

    fn find_agent_by_email(&self, email: &str) -> RepoResult<Option<Agent>> {
        let agent = self
            .conn
            .query_row(
                &format!("{AGENT_SELECT_SQL} WHERE email = ?1;"),
                [email.trim()],
                parse_agent_row,
            )
            .optional()?;
        Ok(agent)
    }

    fn list_agents(&self) -> RepoResult<Vec<Agent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AGENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let agents = stmt
            .query_map([], parse_agent_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(agents)
    }
}

fn parse_agent_row(row: &Row<'_>) -> rusqlite::Result<Agent> {
    Ok(Agent {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        hashed_password: PasswordHash::from_stored(row.get::<_, String>("hashed_password")?),
    })
}
