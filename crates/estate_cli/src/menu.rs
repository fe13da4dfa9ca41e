//! Interactive menu built on `dialoguer`.
//!
//! Every recoverable failure is printed and the loop continues; only a
//! storage failure or a terminal IO error ends the session.

use crate::action::{Action, App, Secret};
use crate::render::{render, Format};
use anyhow::{bail, Result};
use dialoguer::{Input, Password, Select};
use estate_core::{parse_id, ClientPatch, NewProperty, PropertyPatch, ServiceResult};
use log::info;

const MENU_ITEMS: &[&str] = &[
    "Signup",
    "Login",
    "Add Property",
    "Add Client",
    "Add Room",
    "Add Payment",
    "List Clients",
    "List Properties",
    "List Rooms",
    "List Payments",
    "Update Property",
    "Update Client",
    "Delete Client",
    "Delete Room",
    "Search Client",
    "Exit",
];

pub fn run_menu(app: &App) -> Result<()> {
    info!("event=menu_start module=cli status=ok");
    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Menu")
            .items(MENU_ITEMS)
            .default(0)
            .interact()?;

        let action = match prompt_action(choice)? {
            Prompted::Exit => {
                println!("Exiting...");
                return Ok(());
            }
            Prompted::Action(Ok(action)) => action,
            Prompted::Action(Err(err)) => {
                println!("{err}");
                continue;
            }
        };

        match app.execute(action) {
            Ok(outcome) => println!("{}", render(&outcome, Format::Text)?),
            Err(err) if err.is_recoverable() => println!("{err}"),
            Err(err) => bail!(err),
        }
    }
}

enum Prompted {
    Exit,
    /// Input parsing may fail before anything reaches the core.
    Action(ServiceResult<Action>),
}

fn prompt_action(choice: usize) -> Result<Prompted> {
    let action = match choice {
        0 => Ok(Action::Signup {
            name: text("Your name")?,
            email: text("Your email")?,
            password: new_password("Your password")?,
        }),
        1 => Ok(Action::Login {
            email: text("Your email")?,
            password: password("Your password")?,
        }),
        2 => {
            let address = text("Property address")?;
            let location = text("Property location")?;
            id("Agent ID")?.map(|agent_id| {
                Action::AddProperty(NewProperty::new(&address, &location, agent_id))
            })
        }
        3 => {
            let name = text("Client name")?;
            let email = text("Client email")?;
            let password = password("Client password")?;
            let agent_id = id("Agent ID")?;
            let property_id = id("Property ID")?;
            agent_id.and_then(|agent_id| {
                property_id.map(|property_id| Action::AddClient {
                    name,
                    email,
                    password,
                    agent_id,
                    property_id,
                })
            })
        }
        4 => {
            let kind = text("Room type")?;
            let size = text("Room size")?;
            id("Property ID")?.map(|property_id| Action::AddRoom {
                kind,
                size,
                property_id,
            })
        }
        5 => {
            let amount = text("Payment amount")?;
            let date = text("Payment date (YYYY-MM-DD or DD/MM/YYYY)")?;
            id("Client ID")?.map(|client_id| Action::AddPayment {
                amount,
                date,
                client_id,
            })
        }
        6 => Ok(Action::ListClients),
        7 => Ok(Action::ListProperties),
        8 => Ok(Action::ListRooms { property_id: None }),
        9 => Ok(Action::ListPayments { client_id: None }),
        10 => match id("Property ID")? {
            Ok(id) => {
                let patch = PropertyPatch {
                    address: optional_text("New address (blank keeps current)")?,
                    location: optional_text("New location (blank keeps current)")?,
                };
                Ok(Action::UpdateProperty { id, patch })
            }
            Err(err) => Err(err),
        },
        11 => match id("Client ID")? {
            Ok(id) => {
                let patch = ClientPatch {
                    name: optional_text("New name (blank keeps current)")?,
                    email: optional_text("New email (blank keeps current)")?,
                };
                Ok(Action::UpdateClient { id, patch })
            }
            Err(err) => Err(err),
        },
        12 => id("Client ID")?.map(|id| Action::DeleteClient { id }),
        13 => id("Room ID")?.map(|id| Action::DeleteRoom { id }),
        14 => Ok(Action::SearchClients {
            query: text("Client name to search for")?,
        }),
        _ => return Ok(Prompted::Exit),
    };
    Ok(Prompted::Action(action))
}

fn text(prompt: &str) -> std::io::Result<String> {
    Input::<String>::new().with_prompt(prompt).interact_text()
}

fn optional_text(prompt: &str) -> std::io::Result<Option<String>> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(value).filter(|value| !value.trim().is_empty()))
}

/// Reads an id as text so non-numeric input surfaces as malformed input
/// instead of a silent re-prompt.
fn id(prompt: &str) -> std::io::Result<ServiceResult<i64>> {
    let raw = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(parse_id(&raw, prompt))
}

fn password(prompt: &str) -> std::io::Result<Secret> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map(Secret::new)
}

fn new_password(prompt: &str) -> std::io::Result<Secret> {
    Password::new()
        .with_prompt(prompt)
        .with_confirmation(
            "Repeat your password",
            "Passwords do not match. Please try again.",
        )
        .interact()
        .map(Secret::new)
}
