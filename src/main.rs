//! `hotel-booking` server binary.
//!
//! Usage:
//!   hotel-booking serve [--config <path>]
//!   hotel-booking make-admin <username>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hotel_booking::config::AppConfig;
use hotel_booking::core::ServiceError;
use hotel_booking::server::{AppState, ServerBuilder, Stores};
use tracing::info;

/// Hotel booking backend.
#[derive(Parser, Debug)]
#[command(name = "hotel-booking", about = "Hotel booking backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API and the admin panel.
    Serve {
        /// Path to a YAML config file.
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
    },
    /// Grant ROLE_ADMIN to an existing customer.
    MakeAdmin {
        username: String,

        /// Path to a YAML config file.
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_booking=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config } => {
            let config = AppConfig::load(config.as_deref())?;
            let stores = Stores::connect(&config.storage).await?;
            let state = AppState::new(stores, config.pagination.page_size);

            info!(page_size = config.pagination.page_size, "Starting hotel-booking");
            ServerBuilder::new()
                .with_state(state)
                .serve(&config.server.address())
                .await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::MakeAdmin { username, config } => {
            let config = AppConfig::load(config.as_deref())?;
            let stores = Stores::connect(&config.storage).await?;
            let state = AppState::new(stores, config.pagination.page_size);

            match state.customers.promote_to_admin(&username).await {
                Ok(profile) => {
                    info!(username = %profile.username, roles = ?profile.roles, "Customer promoted to admin");
                    Ok(ExitCode::SUCCESS)
                }
                Err(ServiceError::NotFound { .. }) => {
                    eprintln!("No customer named '{}'", username);
                    Ok(ExitCode::from(1))
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
