use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::error::ResolveError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Invalid identities and path traversal attempts
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("session store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Resolve(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
