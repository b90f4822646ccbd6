use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("File processing error: {0}")]
    FileProcessing(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) | AppError::Parse(_) => StatusCode::BAD_REQUEST,
            AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Io(_) | AppError::FileProcessing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "success": false
        }));

        (status, body).into_response()
    }
}
