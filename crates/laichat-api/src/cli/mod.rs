//! CLI command definitions and dispatch for the `laichat` binary.
//!
//! Uses clap derive macros for argument parsing. One flat set of verbs:
//! `laichat chat`, `laichat conversations`, `laichat quote`,
//! `laichat profile`, `laichat serve`.

pub mod chat;
pub mod conversations;
pub mod profile;
pub mod quote;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use uuid::Uuid;

/// Chat in Lai Hakha with a streaming AI companion.
#[derive(Parser)]
#[command(name = "laichat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session in the terminal.
    Chat {
        /// Resume a previous conversation by ID.
        #[arg(long)]
        resume: Option<Uuid>,

        /// Attach a file to the first message (repeatable).
        #[arg(long, value_name = "PATH")]
        attach: Vec<PathBuf>,

        /// Gateway base URL (defaults to the configured host and port).
        #[arg(long)]
        server: Option<String>,
    },

    /// List saved conversations.
    #[command(alias = "ls")]
    Conversations {
        /// Filter by a title search term.
        #[arg(long)]
        search: Option<String>,
    },

    /// Show the quote of the day.
    Quote {
        /// Ask the AI for a fresh quote instead of today's cached one.
        #[arg(long)]
        regenerate: bool,
    },

    /// View or update your profile and client settings.
    Profile {
        /// Set the display name.
        #[arg(long)]
        name: Option<String>,

        /// Set the avatar image URL.
        #[arg(long)]
        avatar: Option<String>,

        /// Show or hide the daily quote in the chat banner (true/false).
        #[arg(long)]
        ticker: Option<bool>,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
