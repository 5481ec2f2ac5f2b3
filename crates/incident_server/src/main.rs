//! Incident service entry point.
//!
//! # Responsibility
//! - Parse configuration, start logging, migrate the database.
//! - Serve the HTTP API until interrupted.

mod config;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::ServerConfig;
use incident_api::{router, AppState};
use incident_core::db::open_db;
use incident_core::db::seed::seed_demo_incidents;
use incident_core::{init_logging, Database};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    init_logging(config.effective_log_level(), config.log_dir.as_deref())
        .map_err(|err| anyhow!("logging init failed: {err}"))?;

    let database = Database::open(config.db_path.clone())
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;

    if config.seed_demo {
        let conn = open_db(database.path()).context("failed to open database for seeding")?;
        seed_demo_incidents(&conn).context("failed to seed demo incidents")?;
    }

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=server status=ok bind={} db_path={}",
        config.bind,
        config.db_path.display()
    );

    axum::serve(listener, router(AppState::new(database)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=server_signal module=server status=error error={err}");
    }
}
