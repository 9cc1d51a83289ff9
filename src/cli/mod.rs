use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{stdin, stdout, IsTerminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::ExpenseService;

pub mod render;
mod shell;

pub use shell::{Flow, Shell};

/// Outlay - Session Expense Tracker
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Record, categorize and total expenses for the length of a session")]
#[command(version)]
pub struct Cli {
    /// Currency symbol shown in front of amounts
    #[arg(long, default_value = "$", global = true)]
    pub currency: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
pub enum Commands {
    /// Start an interactive session (default). Reads commands from stdin.
    Shell,

    /// List the available categories
    Categories,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_logging(self.verbose);

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => {
                let interactive = stdin().is_terminal();
                if interactive {
                    println!(
                        "outlay {} - type 'help' for commands, 'quit' to leave",
                        env!("CARGO_PKG_VERSION")
                    );
                }

                let mut shell = Shell::new(ExpenseService::new(), stdout().lock(), self.currency);
                shell.run(stdin().lock(), interactive)?;
                tracing::debug!(
                    expenses = shell.service().ledger().len(),
                    "Session ended"
                );
            }

            Commands::Categories => {
                render::write_categories(&mut stdout().lock())?;
            }
        }

        Ok(())
    }
}

/// Install the global tracing subscriber. Logs go to stderr so they never mix
/// with command output. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
