use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::AppConfig,
    routes::views::{PageDataSource, build_page_source},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub page_source: Arc<dyn PageDataSource>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        let page_source = build_page_source(&config, &db);
        Arc::new(Self {
            config,
            db,
            page_source,
        })
    }
}
