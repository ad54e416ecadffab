use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Every way a request can fail. All of them end the request; none are retried here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Only POST allowed")]
    MethodNotAllowed,

    #[error("URL not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Storage(e) => {
                tracing::error!("Storage failure: {e}");
                "Database error".to_owned()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                "Internal error".to_owned()
            }
            other => other.to_string(),
        };

        (status, body).into_response()
    }
}
