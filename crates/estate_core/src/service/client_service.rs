//! Client use-cases.
//!
//! # Invariants
//! - Client passwords are hashed before a session opens.
//! - Deleting a client with recorded payments is rejected, not cascaded.

use super::error::{ServiceError, ServiceResult};
use super::{in_session, log_outcome, read_back_missing};
use crate::credential::PasswordHasher;
use crate::db::SessionFactory;
use crate::model::agent::AgentId;
use crate::model::client::{Client, ClientId, ClientPatch, NewClient};
use crate::model::property::PropertyId;
use crate::model::{require_email, require_text};
use crate::repo::client_repo::{ClientRepository, SqliteClientRepository};

/// Caller input for registering a client.
#[derive(Clone, PartialEq, Eq)]
pub struct NewClientInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub agent_id: AgentId,
    pub property_id: PropertyId,
}

impl std::fmt::Debug for NewClientInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewClientInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("agent_id", &self.agent_id)
            .field("property_id", &self.property_id)
            .finish()
    }
}

/// Use-case service for clients.
pub struct ClientService<'s> {
    sessions: &'s SessionFactory,
    hasher: PasswordHasher,
}

impl<'s> ClientService<'s> {
    pub fn new(sessions: &'s SessionFactory, hasher: PasswordHasher) -> Self {
        Self { sessions, hasher }
    }

    /// Registers a client under an agent and a property.
    ///
    /// Missing agent or property surfaces as `ConstraintViolation` at commit.
    pub fn add_client(&self, input: &NewClientInput) -> ServiceResult<Client> {
        let result = self.add_client_inner(input);
        log_outcome("client_add", &result, |client| {
            format!(
                "client_id={} agent_id={} property_id={}",
                client.id, client.agent_id, client.property_id
            )
        });
        result
    }

    fn add_client_inner(&self, input: &NewClientInput) -> ServiceResult<Client> {
        require_text("name", &input.name)?;
        require_email(&input.email)?;
        let draft = NewClient::new(
            &input.name,
            &input.email,
            self.hasher.hash(&input.password)?,
            input.agent_id,
            input.property_id,
        );

        in_session(self.sessions, "client_add", |tx| {
            let repo = SqliteClientRepository::try_new(tx)?;
            let id = repo.create_client(&draft)?;
            repo.get_client(id)?
                .ok_or_else(|| read_back_missing("created client"))
        })
    }

    pub fn get_client(&self, id: ClientId) -> ServiceResult<Option<Client>> {
        in_session(self.sessions, "client_get", |tx| {
            Ok(SqliteClientRepository::try_new(tx)?.get_client(id)?)
        })
    }

    pub fn list_clients(&self) -> ServiceResult<Vec<Client>> {
        in_session(self.sessions, "client_list", |tx| {
            Ok(SqliteClientRepository::try_new(tx)?.list_clients()?)
        })
    }

    /// Applies `patch` to an existing client and returns the stored result.
    pub fn update_client(&self, id: ClientId, patch: &ClientPatch) -> ServiceResult<Client> {
        let result = in_session(self.sessions, "client_update", |tx| {
            let repo = SqliteClientRepository::try_new(tx)?;
            let mut client = repo
                .get_client(id)?
                .ok_or(ServiceError::NotFound {
                    entity: "client",
                    id,
                })?;
            client.apply(patch);
            repo.update_client(&client)?;
            Ok(client)
        });
        log_outcome("client_update", &result, |client| {
            format!("client_id={}", client.id)
        });
        result
    }

    pub fn delete_client(&self, id: ClientId) -> ServiceResult<()> {
        let result = in_session(self.sessions, "client_delete", |tx| {
            Ok(SqliteClientRepository::try_new(tx)?.delete_client(id)?)
        });
        log_outcome("client_delete", &result, |_| format!("client_id={id}"));
        result
    }

    /// Case-insensitive substring search over client names and emails.
    pub fn search_clients(&self, fragment: &str) -> ServiceResult<Vec<Client>> {
        let result = in_session(self.sessions, "client_search", |tx| {
            Ok(SqliteClientRepository::try_new(tx)?.search_clients(fragment)?)
        });
        log_outcome("client_search", &result, |clients| {
            format!("hits={}", clients.len())
        });
        result
    }
}
