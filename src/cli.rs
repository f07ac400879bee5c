use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::str::FromStr;

use crate::types::{TicketStatus, VALID_STATUSES};

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "Helpdesk ticket dashboard")]
#[command(version)]
pub struct Cli {
    /// With no subcommand the dashboard app starts at the splash screen
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the ticket dashboard (requires a session)
    #[command(visible_alias = "d")]
    Dashboard,

    /// Sign in with email and password
    Login {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out and forget the stored session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List one page of tickets, newest first
    Ls {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1, value_parser = parse_page)]
        page: usize,

        /// Only show tickets with this status (OPEN, PROSES, SELESAI)
        #[arg(short, long, value_parser = parse_status)]
        status: Option<TicketStatus>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show total, open, in-process and done counts
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one ticket
    Show {
        /// Ticket id or ticket code
        #[arg(value_parser = parse_ticket_key)]
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start work on a ticket (OPEN -> PROSES)
    Start {
        /// Ticket id or ticket code
        #[arg(value_parser = parse_ticket_key)]
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a ticket done (-> SELESAI)
    Close {
        /// Ticket id or ticket code
        #[arg(value_parser = parse_ticket_key)]
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a ticket's status directly
    SetStatus {
        /// Ticket id or ticket code
        #[arg(value_parser = parse_ticket_key)]
        key: String,

        /// New status (OPEN, PROSES, SELESAI)
        #[arg(value_parser = parse_status)]
        status: TicketStatus,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., backend.url, dashboard.poll_interval_secs)
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn run(self) -> crate::error::Result<()> {
        match self.command {
            None => Commands::run_app(crate::router::Route::Splash).await,
            Some(command) => command.run().await,
        }
    }
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            Backends, LsOptions, OutputOptions, cmd_close, cmd_config_get, cmd_config_set,
            cmd_config_show, cmd_login, cmd_logout, cmd_ls, cmd_set_status, cmd_show, cmd_start,
            cmd_stats,
        };
        use crate::config::Config;
        use crate::router::Route;

        fn backends() -> crate::error::Result<Backends> {
            Backends::from_config(Config::load()?)
        }

        let (output, options) = match self {
            Commands::Dashboard => return Self::run_app(Route::Dashboard).await,

            Commands::Login { json } => (cmd_login(&backends()?).await?, OutputOptions { json }),
            Commands::Logout { json } => (cmd_logout(&backends()?).await?, OutputOptions { json }),

            Commands::Ls { page, status, json } => (
                cmd_ls(&backends()?, LsOptions { page, status }).await?,
                OutputOptions { json },
            ),
            Commands::Stats { json } => (cmd_stats(&backends()?).await?, OutputOptions { json }),
            Commands::Show { key, json } => {
                (cmd_show(&backends()?, &key).await?, OutputOptions { json })
            }

            Commands::Start { key, json } => {
                (cmd_start(&backends()?, &key).await?, OutputOptions { json })
            }
            Commands::Close { key, json } => {
                (cmd_close(&backends()?, &key).await?, OutputOptions { json })
            }
            Commands::SetStatus { key, status, json } => (
                cmd_set_status(&backends()?, &key, status).await?,
                OutputOptions { json },
            ),

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => (cmd_config_show()?, OutputOptions { json }),
                ConfigAction::Set { key, value } => {
                    (cmd_config_set(&key, &value)?, OutputOptions::default())
                }
                ConfigAction::Get { key } => (cmd_config_get(&key)?, OutputOptions::default()),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                return Ok(());
            }
        };

        output.print(options)
    }

    async fn run_app(start: crate::router::Route) -> crate::error::Result<()> {
        use crate::commands::{Backends, cmd_dashboard};
        use crate::config::Config;

        let backends = Backends::from_config(Config::load()?)?;
        cmd_dashboard(backends, start).await?;
        Ok(())
    }
}

fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    parse_with_validation(
        s,
        |v| TicketStatus::from_str(v).map_err(|_| String::new()),
        "status",
        VALID_STATUSES,
    )
}

fn parse_page(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("Page numbers start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("Invalid page '{}'. Must be a positive number", s)),
    }
}

fn parse_ticket_key(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Ticket id or code cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Write completions for `shell` to stdout.
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "helpdesk", &mut io::stdout());
}
