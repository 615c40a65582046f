use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers;
use crate::config::DatabaseConfig;

/// Opens the store and creates any missing tables from the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = providers::default_registry()?.connect(cfg).await?;
    info!("syncing database schema from entities");
    db.get_schema_registry("todo_manager::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}
