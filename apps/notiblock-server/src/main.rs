//! Notiblock server entry point.

mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use clap::{Parser, Subcommand};
use notice_service::domain::{OptionStore, SystemClock};
use notice_service::infra::{InMemoryOptionStore, SeaOrmOptionStore};
use notice_service::{ModuleCtx, NoticeServiceModule};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::{AppConfig, DatabaseConfig};

/// Notiblock site notice server
#[derive(Parser)]
#[command(name = "notiblock-server")]
#[command(about = "Serves the site notice settings, dashboard and blocks", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML configuration file (optional)
    #[arg(short, long, global = true, default_value = "config/notiblock.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Default)]
enum Commands {
    /// Run the HTTP server (default)
    #[default]
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Validate and print the effective configuration
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    logging::init_logging(&config.logging)?;

    match cli.command.unwrap_or_default() {
        Commands::Serve => serve(config).await,
        Commands::Migrate => migrate(&config.database).await,
        Commands::CheckConfig => check_config(&config),
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    info!("Starting notiblock server...");
    config.validate()?;

    let options = open_option_store(&config.database).await?;

    let module = NoticeServiceModule::default();
    module.init(ModuleCtx {
        config: config.notice.clone(),
        auth: config.auth.clone(),
        options,
        clock: Arc::new(SystemClock),
    })?;

    let router = Router::new().route("/health", get(health));
    let app = module
        .register_rest(router)?
        .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            cancel.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn migrate(database: &DatabaseConfig) -> Result<()> {
    if database.is_memory() {
        warn!("In-memory option store has no schema; nothing to migrate");
        return Ok(());
    }

    let db = connect(database).await?;
    NoticeServiceModule::migrate(&db).await
}

fn check_config(config: &AppConfig) -> Result<()> {
    config.validate()?;
    let rendered = serde_yaml::to_string(&config.redacted())?;
    println!("{rendered}");
    info!("Configuration is valid");
    Ok(())
}

async fn open_option_store(database: &DatabaseConfig) -> Result<Arc<dyn OptionStore>> {
    if database.is_memory() {
        warn!("Using in-memory option store; settings are lost on restart");
        return Ok(Arc::new(InMemoryOptionStore::new()));
    }

    let db = connect(database).await?;
    if database.auto_migrate {
        NoticeServiceModule::migrate(&db).await?;
    }
    Ok(Arc::new(SeaOrmOptionStore::new(Arc::new(db))))
}

async fn connect(database: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(&database.url);
    opts.max_connections(database.max_connections)
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");
    Ok(db)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
