//! Meeting task tracker (mtt-web) - Main entry point
//!
//! Imports meeting minutes from `.xlsx` uploads, lists and edits the
//! resulting tasks, and mails them to their responsible parties.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mtt_common::db::init::init_database;
use mtt_common::TaskStore;
use mtt_web::config::{load_toml_config, process_env, CliOverrides, ServiceConfig, TomlConfig};
use mtt_web::services::Mailer;
use mtt_web::{build_router, AppState};

/// Command-line arguments for mtt-web
#[derive(Parser, Debug)]
#[command(name = "mtt-web")]
#[command(about = "Meeting task tracker web service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "MTT_BIND")]
    bind_address: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long, env = "MTT_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "MTT_DATABASE")]
    database: Option<PathBuf>,

    /// Host (and port) used in links of notification emails
    #[arg(long, env = "SERVER_HOST")]
    server_host: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long, env = "MTT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads the environment
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mtt_web=info,mtt_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mtt-web v{}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warn!("No .env file loaded ({}); using process environment", e),
    }

    let args = Args::parse();

    let toml_config = match &args.config {
        Some(path) => {
            let config = load_toml_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!("Loaded config file {}", path.display());
            config
        }
        None => TomlConfig::default(),
    };

    let cli = CliOverrides {
        bind_address: args.bind_address,
        port: args.port,
        database_path: args.database,
        server_host: args.server_host,
    };
    let config = ServiceConfig::resolve(cli, &toml_config, process_env);

    info!("Database path: {}", config.database_path.display());
    let pool = match init_database(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e).context("Database initialization failed");
        }
    };

    if config.mail.complete().is_none() {
        warn!("SMTP configuration is incomplete; sending email will fail until it is set");
    }

    let store = TaskStore::new(pool);
    let mailer = Mailer::new(config.mail.clone(), config.server_host.clone());
    let app = build_router(AppState::new(store, mailer));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;

    info!("mtt-web listening on http://{}", config.listen_addr);
    info!("Notification links point to http://{}", config.server_host);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
