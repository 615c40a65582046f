use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Set, prelude::DateTimeWithTimeZone,
};

use super::{DaoBase, DaoLayerError, DaoResult, find_by_id_in};
use crate::db::entities::{prelude::Task, task};

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub category_id: Option<i32>,
    pub due_date: Option<DateTimeWithTimeZone>,
}

/// Partial update. The nullable columns use a nested `Option` so that
/// "clear the value" (`Some(None)`) differs from "leave it" (`None`).
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<Option<i32>>,
    pub due_date: Option<Option<DateTimeWithTimeZone>>,
}

#[derive(Clone)]
pub struct TaskDao {
    db: DatabaseConnection,
}

impl DaoBase for TaskDao {
    type Entity = Task;
    const ENTITY_NAME: &'static str = "Task";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TaskDao {
    pub async fn count_by_category(&self, category_id: i32) -> DaoResult<u64> {
        Ok(Task::find()
            .filter(task::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await?)
    }

    pub async fn insert<C: ConnectionTrait>(&self, conn: &C, new: NewTask) -> DaoResult<task::Model> {
        let model = task::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            priority: Set(new.priority),
            status: Set(new.status),
            category_id: Set(new.category_id),
            due_date: Set(new.due_date),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        changes: TaskChanges,
    ) -> DaoResult<task::Model> {
        let existing = find_by_id_in::<Task, _>(conn, Self::ENTITY_NAME, id).await?;
        let mut active = existing.clone().into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(priority) = changes.priority {
            active.priority = Set(priority);
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(due_date) = changes.due_date {
            active.due_date = Set(due_date);
        }
        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(conn).await?)
    }

    pub async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> DaoResult<()> {
        let result = Task::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            });
        }
        Ok(())
    }
}
