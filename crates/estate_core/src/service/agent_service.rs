//! Agent signup and login.
//!
//! # Invariants
//! - Passwords are hashed before a session opens and never leave this
//!   module in plaintext.
//! - Login failures do not reveal whether the email or the password was
//!   wrong, by message or by bcrypt work spent.

use super::error::{ServiceError, ServiceResult};
use super::{in_session, log_outcome, read_back_missing};
use crate::credential::PasswordHasher;
use crate::db::SessionFactory;
use crate::model::agent::{Agent, AgentId, NewAgent};
use crate::model::{require_email, require_text};
use crate::repo::agent_repo::{AgentRepository, SqliteAgentRepository};

/// Use-case service for agent accounts.
pub struct AgentService<'s> {
    sessions: &'s SessionFactory,
    hasher: PasswordHasher,
}

impl<'s> AgentService<'s> {
    pub fn new(sessions: &'s SessionFactory, hasher: PasswordHasher) -> Self {
        Self { sessions, hasher }
    }

    /// Registers a new agent.
    ///
    /// # Errors
    /// - `ConstraintViolation` when the email is already registered; the
    ///   existing agent is untouched.
    /// - `InvalidFormat` for blank name, malformed email or empty password.
    pub fn signup(&self, name: &str, email: &str, password: &str) -> ServiceResult<Agent> {
        let result = self.signup_inner(name, email, password);
        log_outcome("agent_signup", &result, |agent| {
            format!("agent_id={}", agent.id)
        });
        result
    }

    fn signup_inner(&self, name: &str, email: &str, password: &str) -> ServiceResult<Agent> {
        require_text("name", name)?;
        require_email(email)?;
        let draft = NewAgent::new(name, email, self.hasher.hash(password)?);

        in_session(self.sessions, "agent_signup", |tx| {
            let repo = SqliteAgentRepository::try_new(tx)?;
            let id = repo.create_agent(&draft)?;
            repo.get_agent(id)?
                .ok_or_else(|| read_back_missing("created agent"))
        })
    }

    /// Authenticates an agent by email and password.
    pub fn login(&self, email: &str, password: &str) -> ServiceResult<Agent> {
        let result = in_session(self.sessions, "agent_login", |tx| {
            Ok(SqliteAgentRepository::try_new(tx)?.find_agent_by_email(email)?)
        })
        .and_then(|found| match found {
            Some(agent) if self.hasher.verify(password, &agent.hashed_password) => Ok(agent),
            Some(_) => Err(ServiceError::InvalidCredentials),
            None => {
                self.hasher.verify_absent(password);
                Err(ServiceError::InvalidCredentials)
            }
        });
        log_outcome("agent_login", &result, |agent| {
            format!("agent_id={}", agent.id)
        });
        result
    }

    pub fn get_agent(&self, id: AgentId) -> ServiceResult<Option<Agent>> {
        in_session(self.sessions, "agent_get", |tx| {
            Ok(SqliteAgentRepository::try_new(tx)?.get_agent(id)?)
        })
    }

    pub fn list_agents(&self) -> ServiceResult<Vec<Agent>> {
        in_session(self.sessions, "agent_list", |tx| {
            Ok(SqliteAgentRepository::try_new(tx)?.list_agents()?)
        })
    }
}
