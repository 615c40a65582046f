use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set,
};

use super::{DaoBase, DaoLayerError, DaoResult, find_by_id_in};
use crate::db::entities::{category, prelude::Category};

/// Fields a partial update may overwrite; `None` leaves the column alone.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct CategoryDao {
    db: DatabaseConnection,
}

impl DaoBase for CategoryDao {
    type Entity = Category;
    const ENTITY_NAME: &'static str = "Category";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl CategoryDao {
    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        description: &str,
    ) -> DaoResult<category::Model> {
        let model = category::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        changes: CategoryChanges,
    ) -> DaoResult<category::Model> {
        let existing = find_by_id_in::<Category, _>(conn, Self::ENTITY_NAME, id).await?;
        let mut active = existing.clone().into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(conn).await?)
    }

    pub async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> DaoResult<()> {
        let result = Category::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            });
        }
        Ok(())
    }
}
