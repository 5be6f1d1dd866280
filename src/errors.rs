use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure a request can surface. Responses carry the message
/// in a JSON body of the form `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid sort field '{0}'")]
    InvalidSortField(String),

    #[error("Product with id '{0}' not found")]
    ProductNotFound(String),

    #[error("Page {page} not found. Total pages: {total_pages}")]
    PageNotFound { page: usize, total_pages: usize },

    #[error("internal error: {0}")]
    Internal(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidSortField(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::ProductNotFound(_) | ApiError::PageNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
