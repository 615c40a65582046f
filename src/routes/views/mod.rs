use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

mod pages;
pub mod source;

pub use source::{ApiSource, PageDataSource, StoreSource, build_page_source};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(pages::router(state))
}
