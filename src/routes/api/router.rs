use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{categories, tasks};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(categories::router(state.clone()))
        .merge(tasks::router(state))
}
