//! `estate` command-line entry point.
//!
//! # Responsibility
//! - Resolve runtime configuration and initialize logging once.
//! - Open the database and dispatch either one subcommand or the menu.
//!
//! # Invariants
//! - Passwords are read from the terminal without echo, never from argv.
//! - A failed subcommand exits non-zero after printing its message.

mod action;
mod cli;
mod config;
mod menu;
mod render;

use action::{Action, App, Secret};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::RuntimeConfig;
use dialoguer::Password;
use estate_core::{ClientPatch, NewProperty, PasswordHasher, PropertyPatch, SessionFactory};
use log::{error, info};
use render::{render, Format};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = RuntimeConfig::resolve(&cli)?;

    let log_dir = config
        .log_dir
        .to_str()
        .ok_or_else(|| anyhow!("log directory is not valid UTF-8"))?;
    estate_core::init_logging(&config.log_level, log_dir).map_err(|err| anyhow!("{err}"))?;

    config.ensure_db_parent()?;
    let sessions = SessionFactory::open(&config.db_path).with_context(|| {
        format!("failed to open database `{}`", config.db_path.display())
    })?;
    info!(
        "event=cli_start module=cli status=ok db={}",
        config.db_path.display()
    );
    let app = App::new(sessions, PasswordHasher::default());

    let command = match cli.command {
        None | Some(Commands::Menu) => {
            menu::run_menu(&app)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(command) => command,
    };

    let (action, format) = into_action(command)?;
    match app.execute(action) {
        Ok(outcome) => {
            println!("{}", render(&outcome, format)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn into_action(command: Commands) -> Result<(Action, Format)> {
    let text = Format::Text;
    let pair = match command {
        Commands::Signup { name, email } => (
            Action::Signup {
                name,
                email,
                password: prompt_new_password()?,
            },
            text,
        ),
        Commands::Login { email } => (
            Action::Login {
                email,
                password: prompt_password("Your password")?,
            },
            text,
        ),
        Commands::AddProperty {
            address,
            location,
            agent_id,
        } => (
            Action::AddProperty(NewProperty::new(&address, &location, agent_id)),
            text,
        ),
        Commands::AddClient {
            name,
            email,
            agent_id,
            property_id,
        } => (
            Action::AddClient {
                name,
                email,
                password: prompt_password("Client password")?,
                agent_id,
                property_id,
            },
            text,
        ),
        Commands::AddRoom {
            kind,
            size,
            property_id,
        } => (
            Action::AddRoom {
                kind,
                size,
                property_id,
            },
            text,
        ),
        Commands::AddPayment {
            amount,
            date,
            client_id,
        } => (
            Action::AddPayment {
                amount,
                date,
                client_id,
            },
            text,
        ),
        Commands::ListAgents { format } => (Action::ListAgents, Format::from_flag(format.json)),
        Commands::ListProperties { format } => {
            (Action::ListProperties, Format::from_flag(format.json))
        }
        Commands::ListRooms {
            property_id,
            format,
        } => (
            Action::ListRooms { property_id },
            Format::from_flag(format.json),
        ),
        Commands::ListClients { format } => (Action::ListClients, Format::from_flag(format.json)),
        Commands::ListPayments { client_id, format } => (
            Action::ListPayments { client_id },
            Format::from_flag(format.json),
        ),
        Commands::UpdateProperty {
            id,
            address,
            location,
        } => (
            Action::UpdateProperty {
                id,
                patch: PropertyPatch { address, location },
            },
            text,
        ),
        Commands::UpdateClient { id, name, email } => (
            Action::UpdateClient {
                id,
                patch: ClientPatch { name, email },
            },
            text,
        ),
        Commands::DeleteClient { id } => (Action::DeleteClient { id }, text),
        Commands::DeleteRoom { id } => (Action::DeleteRoom { id }, text),
        Commands::SearchClients { query, format } => (
            Action::SearchClients { query },
            Format::from_flag(format.json),
        ),
        Commands::Menu => return Err(anyhow!("menu is not a single action")),
    };
    Ok(pair)
}

fn prompt_password(prompt: &str) -> Result<Secret> {
    let value = Password::new()
        .with_prompt(prompt)
        .interact()
        .context("failed to read password")?;
    Ok(Secret::new(value))
}

fn prompt_new_password() -> Result<Secret> {
    let value = Password::new()
        .with_prompt("Your password")
        .with_confirmation(
            "Repeat your password",
            "Passwords do not match. Please try again.",
        )
        .interact()
        .context("failed to read password")?;
    Ok(Secret::new(value))
}
