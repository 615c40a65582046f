use crate::{
    db::{
        dao::{CategoryChanges, CategoryDao, DaoBase, DaoLayerError, TaskDao, commit_or_rollback},
        entities::category,
    },
    error::AppError,
};

pub const NAME_NOT_UNIQUE: &str = "Category name must be unique";
pub const HAS_TASKS: &str = "Cannot delete category with associated tasks";

#[derive(Clone)]
pub struct CategoryService {
    category_dao: CategoryDao,
    task_dao: TaskDao,
}

impl CategoryService {
    pub fn new(category_dao: CategoryDao, task_dao: TaskDao) -> Self {
        Self {
            category_dao,
            task_dao,
        }
    }

    pub async fn list(&self) -> Result<Vec<category::Model>, AppError> {
        Ok(self.category_dao.find_all().await?)
    }

    pub async fn get(&self, id: i32) -> Result<category::Model, AppError> {
        Ok(self.category_dao.find_by_id(id).await?)
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<category::Model, AppError> {
        let txn = self.category_dao.begin().await?;
        let result = self.category_dao.insert(&txn, name, description).await;
        let category = commit_or_rollback(txn, result)
            .await
            .map_err(unique_name_violation)?;
        tracing::info!(category_id = category.id, "category created");
        Ok(category)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<category::Model, AppError> {
        let txn = self.category_dao.begin().await?;
        let result = self.category_dao.update(&txn, id, changes).await;
        let category = commit_or_rollback(txn, result)
            .await
            .map_err(unique_name_violation)?;
        tracing::info!(category_id = category.id, "category updated");
        Ok(category)
    }

    /// Deletion is blocked while any task still references the category.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.category_dao.begin().await?;
        let result = self.category_dao.delete(&txn, id).await;
        match commit_or_rollback(txn, result).await {
            Ok(()) => {
                tracing::info!(category_id = id, "category deleted");
                Ok(())
            }
            Err(DaoLayerError::ForeignKeyViolation(detail)) => {
                match self.task_dao.count_by_category(id).await {
                    Ok(referencing) => tracing::warn!(
                        category_id = id,
                        referencing,
                        detail = %detail,
                        "category delete blocked by tasks"
                    ),
                    Err(count_err) => tracing::warn!(
                        category_id = id,
                        detail = %detail,
                        count_error = %count_err,
                        "category delete blocked by tasks; counting them failed"
                    ),
                }
                Err(AppError::integrity(HAS_TASKS))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn unique_name_violation(err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::UniqueViolation(detail) => {
            tracing::warn!(detail = %detail, "duplicate category name rejected");
            AppError::integrity(NAME_NOT_UNIQUE)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::{HAS_TASKS, NAME_NOT_UNIQUE};
    use crate::{
        db::dao::{CategoryChanges, NewTask},
        error::AppError,
        services::ServiceContext,
        test_helpers::test_state,
    };

    fn task_in(category_id: i32) -> NewTask {
        NewTask {
            title: "Pay rent".to_string(),
            description: String::new(),
            priority: "high".to_string(),
            status: "pending".to_string(),
            category_id: Some(category_id),
            due_date: None,
        }
    }

    #[tokio::test]
    async fn duplicate_names_map_to_integrity_errors() {
        let state = test_state().await.unwrap();
        let services = ServiceContext::from_state(&state);
        let categories = services.category();

        categories.create("Bills", "").await.unwrap();
        let other = categories.create("Fun", "").await.unwrap();

        let err = categories.create("Bills", "again").await.unwrap_err();
        assert!(matches!(&err, AppError::Integrity(message) if message == NAME_NOT_UNIQUE));

        let changes = CategoryChanges {
            name: Some("Bills".to_string()),
            ..CategoryChanges::default()
        };
        let err = categories.update(other.id, changes).await.unwrap_err();
        assert!(matches!(err, AppError::Integrity(_)));
        assert_eq!(categories.get(other.id).await.unwrap().name, "Fun");
    }

    #[tokio::test]
    async fn blocked_delete_survives_a_failing_task_count() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Custom(
                "FOREIGN KEY constraint failed".to_string(),
            )])
            .append_query_errors([DbErr::Custom("count failed".to_string())])
            .into_connection();
        let services = ServiceContext::new(&db);

        let err = services.category().delete(1).await.unwrap_err();
        assert!(matches!(&err, AppError::Integrity(message) if message == HAS_TASKS));
    }

    #[tokio::test]
    async fn delete_is_blocked_until_tasks_are_gone() {
        let state = test_state().await.unwrap();
        let services = ServiceContext::from_state(&state);
        let category = services.category().create("Bills", "").await.unwrap();
        let task = services.task().create(task_in(category.id)).await.unwrap();

        let err = services.category().delete(category.id).await.unwrap_err();
        assert!(matches!(&err, AppError::Integrity(message) if message == HAS_TASKS));
        assert_eq!(services.category().list().await.unwrap().len(), 1);

        services.task().delete(task.id).await.unwrap();
        services.category().delete(category.id).await.unwrap();
        assert!(matches!(
            services.category().get(category.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
