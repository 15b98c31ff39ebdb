use std::net::SocketAddr;

use anyhow::Context;
use tracing::{Level, info, warn};

use adease_server::config::AppConfig;
use adease_server::state::AppState;
use adease_server::{build_object_store, build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    seed::ensure_indexes(&db).await?;

    match (&config.auth.operator_email, &config.auth.operator_password) {
        (Some(email), Some(password)) => seed::ensure_operator(&db, email, password)
            .await
            .context("Failed to seed operator account")?,
        _ => warn!("auth.operator_email/operator_password not set; no operator account seeded"),
    }

    let store = build_object_store(&config.storage)
        .await
        .context("Failed to open object storage")?;
    info!(backend = ?config.storage.backend, "Object storage ready");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host/server.port")?;

    let app = build_router(AppState { db, config, store });

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
