use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStatsRepository};

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides API_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    pub host: String,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("SECURITY_JWT_SECRET (or JWT_SECRET) must be set outside development");
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    let pool = DatabaseManager::connect_lazy(&config.database).context("failed to configure database pool")?;
    let repository = Arc::new(PgStatsRepository::new(pool, &config.database));

    let bind_addr = format!("{}:{}", args.host, config.api.port);
    tracing::info!(environment = ?config.environment, "Starting PDTI Safi statistics API");

    let router = app(AppState::new(config, repository));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
