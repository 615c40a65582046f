//! Where the HTML pages get their rows from: straight from the store, or
//! over HTTP from a running instance of the JSON API.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;

use crate::{
    config::{AppConfig, DataSourceKind},
    routes::{
        API_PREFIX,
        api::schema::{CategoryResponse, TaskResponse},
    },
    services::ServiceContext,
};

const API_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait PageDataSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn categories(&self) -> Result<Vec<CategoryResponse>>;

    async fn tasks(&self) -> Result<Vec<TaskResponse>>;
}

pub struct StoreSource {
    services: ServiceContext,
}

impl StoreSource {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            services: ServiceContext::new(db),
        }
    }
}

#[async_trait]
impl PageDataSource for StoreSource {
    fn name(&self) -> &'static str {
        "store"
    }

    async fn categories(&self) -> Result<Vec<CategoryResponse>> {
        let rows = self
            .services
            .category()
            .list()
            .await
            .context("listing categories from the store")?;
        Ok(rows.into_iter().map(CategoryResponse::from).collect())
    }

    async fn tasks(&self) -> Result<Vec<TaskResponse>> {
        let rows = self
            .services
            .task()
            .list()
            .await
            .context("listing tasks from the store")?;
        Ok(rows.into_iter().map(TaskResponse::from).collect())
    }
}

pub struct ApiSource {
    http: Client,
    base_url: String,
}

impl ApiSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .context("building http client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let url = format!("{}{API_PREFIX}/{collection}/", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        response
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("decoding {collection} from {url}"))
    }
}

#[async_trait]
impl PageDataSource for ApiSource {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn categories(&self) -> Result<Vec<CategoryResponse>> {
        self.fetch("categories").await
    }

    async fn tasks(&self) -> Result<Vec<TaskResponse>> {
        self.fetch("tasks").await
    }
}

/// Falls back to the store when the HTTP client cannot be built.
pub fn build_page_source(config: &AppConfig, db: &DatabaseConnection) -> Arc<dyn PageDataSource> {
    match config.frontend.data_source {
        DataSourceKind::Store => Arc::new(StoreSource::new(db)),
        DataSourceKind::Api => match ApiSource::new(config.api_base_url()) {
            Ok(source) => {
                tracing::info!(base_url = %source.base_url, "pages read from the json api");
                Arc::new(source)
            }
            Err(err) => {
                tracing::warn!(error = %err, "api page source unavailable, using the store");
                Arc::new(StoreSource::new(db))
            }
        },
    }
}

/// Loads a list for a page; failures are logged and shown as an empty list.
pub async fn load_or_empty<T, F>(source: &dyn PageDataSource, what: &str, fut: F) -> Vec<T>
where
    F: std::future::Future<Output = Result<Vec<T>>>,
{
    match fut.await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(source = source.name(), error = %format!("{err:#}"), "failed to load {what}");
            Vec::new()
        }
    }
}
