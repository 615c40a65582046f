use std::{collections::HashMap, sync::Arc};

use askama::Template;
use axum::{Router, extract::State, http::StatusCode, response::Html, routing::get};

use crate::{
    routes::api::schema::{CategoryResponse, TaskResponse},
    state::AppState,
};

use super::source::load_or_empty;

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[derive(Template)]
#[template(path = "categories.html")]
struct CategoriesTemplate {
    categories: Vec<CategoryResponse>,
}

#[derive(Template)]
#[template(path = "tasks.html")]
struct TasksTemplate {
    tasks: Vec<TaskRow>,
    categories: Vec<CategoryResponse>,
}

/// A task flattened to the strings the table shows.
struct TaskRow {
    id: i32,
    title: String,
    description: String,
    priority: String,
    status: String,
    category: String,
    due_date: String,
}

type HtmlError = (StatusCode, Html<String>);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/categories", get(categories_page))
        .route("/tasks", get(tasks_page))
        .with_state(state)
}

async fn home() -> Result<Html<String>, HtmlError> {
    render(&HomeTemplate, "home page")
}

async fn categories_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, HtmlError> {
    let source = state.page_source.as_ref();
    let categories = load_or_empty(source, "categories", source.categories()).await;
    render(&CategoriesTemplate { categories }, "categories page")
}

async fn tasks_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, HtmlError> {
    let source = state.page_source.as_ref();
    let tasks = load_or_empty(source, "tasks", source.tasks()).await;
    let categories = load_or_empty(source, "categories", source.categories()).await;
    let tasks = task_rows(tasks, &categories);
    render(&TasksTemplate { tasks, categories }, "tasks page")
}

fn task_rows(tasks: Vec<TaskResponse>, categories: &[CategoryResponse]) -> Vec<TaskRow> {
    let names: HashMap<i32, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();
    tasks
        .into_iter()
        .map(|task| TaskRow {
            category: task
                .category_id
                .and_then(|id| names.get(&id).copied())
                .unwrap_or("-")
                .to_string(),
            due_date: task
                .due_date
                .as_deref()
                .map(display_date)
                .unwrap_or_default(),
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
        })
        .collect()
}

fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|due| due.format(DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn render<T: Template>(template: &T, page: &str) -> Result<Html<String>, HtmlError> {
    template.render().map(Html).map_err(|err| {
        tracing::error!(error = %err, page, "template render failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("failed to render {page}")),
        )
    })
}
