use std::sync::Arc;

use anyhow::Context;
use profiles::{
    config::Config,
    server::{serve, shutdown_signal},
    storage::PostgresStorage,
    utils::logger,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_COMMIT: &str = match option_env!("BUILD_COMMIT") {
    Some(commit) => commit,
    None => "N/A",
};
const BUILD_TIME: &str = match option_env!("BUILD_TIME") {
    Some(time) => time,
    None => "N/A",
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env().context("failed to parse config")?;
    logger::init(config.logger.env);

    if let Err(e) = dotenv {
        tracing::debug!("no .env file loaded: {}", e);
    }

    tracing::info!(
        service = %config.service_name,
        env = ?config.logger.env,
        build_commit = BUILD_COMMIT,
        build_time = BUILD_TIME,
        version = VERSION,
        "starting service"
    );
    tracing::info!(
        config = %serde_json::to_string(&config).context("failed to serialize config")?,
        "configuration loaded"
    );

    let db = PgPoolOptions::new()
        .max_connections(config.db.max_connections)
        .connect_with(config.db.connect_options())
        .await
        .context("could not connect to postgres")?;

    let store = Arc::new(PostgresStorage::new(db.clone()));

    let listener = TcpListener::bind(("0.0.0.0", config.grpc.port))
        .await
        .context("failed to create listener")?;

    serve(store, listener, config.grpc.timeout, shutdown_signal())
        .await
        .context("failed to start server")?;

    db.close().await;
    tracing::info!("gracefully stopped");

    Ok(())
}
