use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub type ApiResult<T> = Result<Json<T>, AppError>;

/// 201 responses carry the created row.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn from_error(err: &AppError) -> Self {
        Self {
            error: err.message().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        log_app_error(&self, status);
        (status, Json(ErrorBody::from_error(&self))).into_response()
    }
}

pub fn created<T: Serialize>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(data)))
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::BadRequest(_) | AppError::Integrity(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn log_app_error(err: &AppError, status: StatusCode) {
    match err {
        AppError::Internal(_) => {
            tracing::error!(status = status.as_u16(), error = %err, "request failed")
        }
        AppError::Integrity(_) => {
            tracing::warn!(status = status.as_u16(), error = %err, "integrity violation")
        }
        _ => tracing::debug!(status = status.as_u16(), error = %err, "request rejected"),
    }
}
