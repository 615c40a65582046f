use crate::{
    db::{
        dao::{DaoBase, DaoLayerError, NewTask, TaskChanges, TaskDao, commit_or_rollback},
        entities::task,
    },
    error::AppError,
};

pub const INVALID_CATEGORY: &str = "Invalid category ID";

#[derive(Clone)]
pub struct TaskService {
    task_dao: TaskDao,
}

impl TaskService {
    pub fn new(task_dao: TaskDao) -> Self {
        Self { task_dao }
    }

    pub async fn list(&self) -> Result<Vec<task::Model>, AppError> {
        Ok(self.task_dao.find_all().await?)
    }

    pub async fn get(&self, id: i32) -> Result<task::Model, AppError> {
        Ok(self.task_dao.find_by_id(id).await?)
    }

    pub async fn create(&self, new: NewTask) -> Result<task::Model, AppError> {
        let txn = self.task_dao.begin().await?;
        let result = self.task_dao.insert(&txn, new).await;
        let task = commit_or_rollback(txn, result)
            .await
            .map_err(invalid_category)?;
        tracing::info!(task_id = task.id, category_id = ?task.category_id, "task created");
        Ok(task)
    }

    pub async fn update(&self, id: i32, changes: TaskChanges) -> Result<task::Model, AppError> {
        let txn = self.task_dao.begin().await?;
        let result = self.task_dao.update(&txn, id, changes).await;
        let task = commit_or_rollback(txn, result)
            .await
            .map_err(invalid_category)?;
        tracing::info!(task_id = task.id, "task updated");
        Ok(task)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.task_dao.begin().await?;
        let result = self.task_dao.delete(&txn, id).await;
        commit_or_rollback(txn, result).await?;
        tracing::info!(task_id = id, "task deleted");
        Ok(())
    }
}

fn invalid_category(err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::ForeignKeyViolation(detail) => {
            tracing::warn!(detail = %detail, "task references a missing category");
            AppError::integrity(INVALID_CATEGORY)
        }
        other => other.into(),
    }
}
