use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    db::dao::CategoryChanges,
    error::AppError,
    response::{ApiResult, CreatedResult, created},
    routes::api::{
        extract::{EntityId, JsonBody},
        schema::{CategoryPayload, CategoryResponse, NAME_REQUIRED, require_text},
    },
    services::{CategoryService, ServiceContext},
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(state)
}

fn service(state: &AppState) -> CategoryService {
    ServiceContext::from_state(state).category()
}

async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CategoryResponse>> {
    let categories = service(&state).list().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

async fn get_category(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> ApiResult<CategoryResponse> {
    let category = service(&state).get(id).await?;
    Ok(Json(category.into()))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CategoryPayload>,
) -> CreatedResult<CategoryResponse> {
    let name = require_text(body.name.as_deref(), NAME_REQUIRED)?;
    let description = body.description.as_deref().unwrap_or_default();
    let category = service(&state).create(name, description).await?;
    created(category.into())
}

async fn update_category(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<CategoryPayload>,
) -> ApiResult<CategoryResponse> {
    let changes = CategoryChanges {
        name: body.name,
        description: body.description,
    };
    let category = service(&state).update(id, changes).await?;
    Ok(Json(category.into()))
}

async fn delete_category(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<StatusCode, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
