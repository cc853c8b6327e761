use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use customer_api::config::AppConfig;
use customer_api::database::{DatabaseManager, PgCustomerRepository};
use customer_api::{app, AppOptions, AppState};

#[derive(Parser)]
#[command(name = "customer-api")]
#[command(about = "Customer CRUD service over HTTP/JSON backed by PostgreSQL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create the customers table if it does not exist, then exit")]
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    tracing::info!("Starting customer API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to prepare database schema")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::InitDb => {
            pool.close().await;
            Ok(())
        }
        Commands::Serve { port } => serve(&config, pool, port).await,
    }
}

async fn serve(config: &AppConfig, pool: PgPool, port: Option<u16>) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(PgCustomerRepository::new(pool.clone())));
    let router = app(state, &AppOptions::from(&config.api));

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.api.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Customer API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
