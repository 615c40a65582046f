use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{category_service::CategoryService, task_service::TaskService},
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn category(&self) -> CategoryService {
        CategoryService::new(self.daos.category(), self.daos.task())
    }

    pub fn task(&self) -> TaskService {
        TaskService::new(self.daos.task())
    }
}
