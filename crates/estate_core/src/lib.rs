//! Core domain logic for the estate property-management tool.
//! This crate is the single source of truth for business invariants.

pub mod credential;
pub mod date;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use credential::{CredentialError, PasswordHash, PasswordHasher};
pub use date::{format_date, parse_date, DateParseError, ACCEPTED_DATE_FORMATS};
pub use db::{DbError, SessionFactory};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::agent::{Agent, AgentId};
pub use model::client::{Client, ClientId, ClientPatch};
pub use model::payment::{Payment, PaymentId};
pub use model::property::{NewProperty, Property, PropertyId, PropertyPatch};
pub use model::room::{Room, RoomId};
pub use model::ValidationError;
pub use repo::{ConstraintKind, RepoError, RepoResult};
pub use service::agent_service::AgentService;
pub use service::client_service::{ClientService, NewClientInput};
pub use service::error::{ErrorKind, ServiceError, ServiceResult};
pub use service::input::{parse_amount, parse_id};
pub use service::payment_service::PaymentService;
pub use service::property_service::PropertyService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
