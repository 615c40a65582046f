//! Wiring shared by unit and integration tests: an isolated in-memory store
//! with the schema applied, wrapped in the same router the server runs.

use std::sync::Arc;

use axum::Router;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

/// Defaults plus a private in-memory SQLite database. The pool is pinned to a
/// single connection because every connection would otherwise open its own
/// empty database.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_idle: 1,
        },
        ..AppConfig::default()
    }
}

pub async fn test_state_with(config: AppConfig) -> anyhow::Result<Arc<AppState>> {
    let db = connection::connect(&config.database).await?;
    Ok(AppState::new(config, db))
}

pub async fn test_state() -> anyhow::Result<Arc<AppState>> {
    test_state_with(test_config()).await
}

pub async fn test_router() -> anyhow::Result<Router> {
    Ok(app(test_state().await?))
}
