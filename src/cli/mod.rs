pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::database::PgStore;
use crate::handlers::AppState;

#[derive(Parser)]
#[command(name = "quickflex")]
#[command(about = "QuickFlex admin CLI - driver onboarding records from the terminal")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Driver listings, profiles and status transitions")]
    Drivers {
        #[command(subcommand)]
        cmd: commands::drivers::DriverCommands,
    },

    #[command(about = "Check database connectivity")]
    Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let store = PgStore::from_config(&config.database)?;
    let state = AppState::new(Arc::new(store), &config.onboarding.pending_status);

    match cli.command {
        Commands::Drivers { cmd } => commands::drivers::handle(cmd, &state, output_format).await,
        Commands::Health => commands::health::handle(&state, output_format).await,
    }
}
