use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    db::dao::{NewTask, TaskChanges},
    error::AppError,
    response::{ApiResult, CreatedResult, created},
    routes::api::{
        extract::{EntityId, JsonBody},
        schema::{
            DEFAULT_PRIORITY, DEFAULT_STATUS, TITLE_REQUIRED, TaskPayload, TaskResponse,
            parse_due_date, require_text,
        },
    },
    services::{ServiceContext, TaskService},
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
}

fn service(state: &AppState) -> TaskService {
    ServiceContext::from_state(state).task()
}

async fn list_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TaskResponse>> {
    let tasks = service(&state).list().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

async fn get_task(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> ApiResult<TaskResponse> {
    let task = service(&state).get(id).await?;
    Ok(Json(task.into()))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<TaskPayload>,
) -> CreatedResult<TaskResponse> {
    let new = new_task(body)?;
    let task = service(&state).create(new).await?;
    created(task.into())
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<TaskPayload>,
) -> ApiResult<TaskResponse> {
    let changes = task_changes(body)?;
    let task = service(&state).update(id, changes).await?;
    Ok(Json(task.into()))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<StatusCode, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn new_task(body: TaskPayload) -> Result<NewTask, AppError> {
    let title = require_text(body.title.as_deref(), TITLE_REQUIRED)?.to_string();
    let due_date = match &body.due_date {
        Some(value) => parse_due_date(value)?,
        None => None,
    };
    Ok(NewTask {
        title,
        description: body.description.unwrap_or_default(),
        priority: body.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        status: body.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        category_id: body.category_id.flatten(),
        due_date,
    })
}

fn task_changes(body: TaskPayload) -> Result<TaskChanges, AppError> {
    let due_date = body.due_date.as_ref().map(parse_due_date).transpose()?;
    Ok(TaskChanges {
        title: body.title,
        description: body.description,
        priority: body.priority,
        status: body.status,
        category_id: body.category_id,
        due_date,
    })
}
