//! The single executor shared by subcommands and the interactive menu.
//!
//! Both front-ends build an `Action`; `App::execute` maps it onto one core
//! service call and returns an `Outcome` for rendering.

use estate_core::{
    Agent, AgentService, Client, ClientPatch, ClientService, NewClientInput, NewProperty,
    PasswordHasher, Payment, PaymentService, Property, PropertyPatch, PropertyService, Room,
    ServiceResult, SessionFactory,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Signup {
        name: String,
        email: String,
        password: Secret,
    },
    Login {
        email: String,
        password: Secret,
    },
    AddProperty(NewProperty),
    AddClient {
        name: String,
        email: String,
        password: Secret,
        agent_id: i64,
        property_id: i64,
    },
    AddRoom {
        kind: String,
        size: String,
        property_id: i64,
    },
    AddPayment {
        amount: String,
        date: String,
        client_id: i64,
    },
    ListAgents,
    ListProperties,
    ListRooms {
        property_id: Option<i64>,
    },
    ListClients,
    ListPayments {
        client_id: Option<i64>,
    },
    UpdateProperty {
        id: i64,
        patch: PropertyPatch,
    },
    UpdateClient {
        id: i64,
        patch: ClientPatch,
    },
    DeleteClient {
        id: i64,
    },
    DeleteRoom {
        id: i64,
    },
    SearchClients {
        query: String,
    },
}

/// Password collected from the terminal; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Message(String),
    Agents(Vec<Agent>),
    Properties(Vec<Property>),
    Rooms(Vec<Room>),
    Clients(Vec<Client>),
    Payments(Vec<Payment>),
}

/// Process-wide handles passed into every action.
pub struct App {
    sessions: SessionFactory,
    hasher: PasswordHasher,
}

impl App {
    pub fn new(sessions: SessionFactory, hasher: PasswordHasher) -> Self {
        Self { sessions, hasher }
    }

    pub fn execute(&self, action: Action) -> ServiceResult<Outcome> {
        let agents = AgentService::new(&self.sessions, self.hasher);
        let properties = PropertyService::new(&self.sessions);
        let clients = ClientService::new(&self.sessions, self.hasher);
        let payments = PaymentService::new(&self.sessions);

        let outcome = match action {
            Action::Signup {
                name,
                email,
                password,
            } => {
                let agent = agents.signup(&name, &email, password.expose())?;
                Outcome::Message(format!(
                    "Agent {} registered successfully with ID {}!",
                    agent.name, agent.id
                ))
            }
            Action::Login { email, password } => {
                let agent = agents.login(&email, password.expose())?;
                Outcome::Message(format!(
                    "Logged in successfully as {} (agent ID {})!",
                    agent.name, agent.id
                ))
            }
            Action::AddProperty(draft) => {
                let property = properties.add_property(&draft)?;
                Outcome::Message(format!(
                    "Property at {} added successfully with ID {}!",
                    property.address, property.id
                ))
            }
            Action::AddClient {
                name,
                email,
                password,
                agent_id,
                property_id,
            } => {
                let client = clients.add_client(&NewClientInput {
                    name,
                    email,
                    password: password.expose().to_string(),
                    agent_id,
                    property_id,
                })?;
                Outcome::Message(format!(
                    "Client {} added successfully with ID {}!",
                    client.name, client.id
                ))
            }
            Action::AddRoom {
                kind,
                size,
                property_id,
            } => {
                let room = properties.add_room(&kind, &size, property_id)?;
                Outcome::Message(format!(
                    "Room of type {} with size {} added successfully to property ID {}!",
                    room.kind, room.size, room.property_id
                ))
            }
            Action::AddPayment {
                amount,
                date,
                client_id,
            } => {
                let payment = payments.add_payment(&amount, &date, client_id)?;
                Outcome::Message(format!(
                    "Payment of {} on {} added successfully for client ID {}!",
                    payment.amount, payment.date, payment.client_id
                ))
            }
            Action::ListAgents => Outcome::Agents(agents.list_agents()?),
            Action::ListProperties => Outcome::Properties(properties.list_properties()?),
            Action::ListRooms { property_id: None } => Outcome::Rooms(properties.list_rooms()?),
            Action::ListRooms {
                property_id: Some(id),
            } => Outcome::Rooms(properties.list_rooms_for_property(id)?),
            Action::ListClients => Outcome::Clients(clients.list_clients()?),
            Action::ListPayments { client_id: None } => {
                Outcome::Payments(payments.list_payments()?)
            }
            Action::ListPayments {
                client_id: Some(id),
            } => Outcome::Payments(payments.list_payments_for_client(id)?),
            Action::UpdateProperty { id, patch } => {
                properties.update_property(id, &patch)?;
                Outcome::Message(format!("Property ID {id} updated successfully!"))
            }
            Action::UpdateClient { id, patch } => {
                clients.update_client(id, &patch)?;
                Outcome::Message(format!("Client ID {id} updated successfully!"))
            }
            Action::DeleteClient { id } => {
                clients.delete_client(id)?;
                Outcome::Message(format!("Client ID {id} deleted successfully!"))
            }
            Action::DeleteRoom { id } => {
                properties.delete_room(id)?;
                Outcome::Message(format!("Room ID {id} deleted successfully!"))
            }
            Action::SearchClients { query } => {
                let found = clients.search_clients(&query)?;
                if found.is_empty() {
                    Outcome::Message(format!("No clients found matching '{query}'."))
                } else {
                    Outcome::Clients(found)
                }
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, App, Outcome, Secret};
    use estate_core::{ErrorKind, NewProperty, PasswordHasher, SessionFactory};

    fn app() -> App {
        App::new(
            SessionFactory::open_in_memory().unwrap(),
            PasswordHasher::with_cost(PasswordHasher::MIN_COST),
        )
    }

    #[test]
    fn signup_then_add_property_then_list() {
        let app = app();
        app.execute(Action::Signup {
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            password: Secret::new("pw".to_string()),
        })
        .unwrap();
        app.execute(Action::AddProperty(NewProperty::new(
            "1 Main St",
            "Springfield",
            1,
        )))
        .unwrap();

        match app.execute(Action::ListProperties).unwrap() {
            Outcome::Properties(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].agent_id, 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn errors_are_returned_not_raised() {
        let app = app();
        let err = app.execute(Action::DeleteClient { id: 3 }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Client ID 3 not found.");
    }

    #[test]
    fn empty_search_reports_message() {
        let app = app();
        let outcome = app
            .execute(Action::SearchClients {
                query: "zed".to_string(),
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Message("No clients found matching 'zed'.".to_string())
        );
    }

    #[test]
    fn secret_debug_is_redacted() {
        let rendered = format!("{:?}", Secret::new("hunter2".to_string()));
        assert!(!rendered.contains("hunter2"));
    }
}
