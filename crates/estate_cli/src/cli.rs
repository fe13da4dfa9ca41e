//! Command-line surface.
//!
//! Passwords are never accepted as arguments; commands that need one prompt
//! for it without echo.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "estate",
    version,
    about = "Manage agents, properties, rooms, clients and payments"
)]
pub struct Cli {
    /// SQLite database file (created when missing).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files.
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Args)]
pub struct ListFormat {
    /// Print JSON instead of text lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a new agent.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Log in as an existing agent.
    Login {
        #[arg(long)]
        email: String,
    },
    AddProperty {
        #[arg(long)]
        address: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        agent_id: i64,
    },
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        agent_id: i64,
        #[arg(long)]
        property_id: i64,
    },
    AddRoom {
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,
        #[arg(long, allow_hyphen_values = true)]
        size: String,
        #[arg(long)]
        property_id: i64,
    },
    AddPayment {
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// YYYY-MM-DD or DD/MM/YYYY
        #[arg(long)]
        date: String,
        #[arg(long)]
        client_id: i64,
    },
    ListAgents {
        #[command(flatten)]
        format: ListFormat,
    },
    ListProperties {
        #[command(flatten)]
        format: ListFormat,
    },
    ListRooms {
        /// Only rooms of this property.
        #[arg(long)]
        property_id: Option<i64>,
        #[command(flatten)]
        format: ListFormat,
    },
    ListClients {
        #[command(flatten)]
        format: ListFormat,
    },
    ListPayments {
        /// Only payments of this client.
        #[arg(long)]
        client_id: Option<i64>,
        #[command(flatten)]
        format: ListFormat,
    },
    UpdateProperty {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    UpdateClient {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    DeleteClient {
        #[arg(long)]
        id: i64,
    },
    DeleteRoom {
        #[arg(long)]
        id: i64,
    },
    /// Case-insensitive search over client names and emails.
    SearchClients {
        query: String,
        #[command(flatten)]
        format: ListFormat,
    },
    /// Interactive menu (default).
    Menu,
}
