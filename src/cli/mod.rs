pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "pdti-stats-api")]
#[command(about = "PDTI Safi statistics API - role-scoped project dashboards")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Sign an access token for an account")]
    Token(commands::token::TokenArgs),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
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

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Some(Commands::Token(args)) => commands::token::handle(args, &config, output_format),
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        None => {
            let args = commands::serve::ServeArgs {
                port: None,
                host: "0.0.0.0".to_string(),
            };
            commands::serve::handle(args, config).await
        }
    }
}
