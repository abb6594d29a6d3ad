use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

use crate::domain::ValidationError;
use crate::infrastructure::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: you do not have permission to perform this action")]
    Unauthorized,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(#[from] JoinError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MalformedPayload(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status.is_server_error() {
            error!("{self}");
            "An error occurred while accessing the diary".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
