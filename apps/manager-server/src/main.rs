use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use manager_server::{AppConfig, app, logging};

/// Client manager server
#[derive(Parser)]
#[command(name = "manager-server", version, about)]
struct Cli {
    /// YAML configuration file; `MANAGER__*` variables override it
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Start the HTTP server (default)
    Run,
    /// Validate configuration and print it with secrets redacted
    Check,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            println!("{}", cfg.redacted_json()?);
            Ok(())
        }
        Commands::Migrate => {
            logging::init(&cfg.logging)?;
            let db = app::connect_db(&cfg.database).await?;
            app::migrate(&db).await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Commands::Run => {
            logging::init(&cfg.logging)?;
            tracing::info!(
                bind_addr = %cfg.server.bind_addr,
                "Starting client manager"
            );
            app::run(cfg).await
        }
    }
}
