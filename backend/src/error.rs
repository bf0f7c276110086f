use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::{create::CreateError, layout::LayoutError, scan::ScanError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("Invalid project path or directory not found.")]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("background task failed: {0}")]
    Task(String),
}

// Every failure surfaces as a flat 500; clients only get the message.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
