// Route exports
pub mod courses;

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;
use crate::core::CoreError;
use crate::models::ErrorResponse;
use crate::services::{IngestError, StoreError};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(courses::configure),
    );
}

/// Failures surfaced to API clients as JSON
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadPayload(String),
}

impl ApiError {
    fn label(&self) -> &'static str {
        match self {
            ApiError::Core(CoreError::Configuration(_)) => "invalid_weights",
            ApiError::Core(CoreError::InvalidRecord { .. }) => "invalid_record",
            ApiError::Ingest(_) => "invalid_spreadsheet",
            ApiError::Store(StoreError::NotFound(_)) => "not_found",
            ApiError::Store(_) => "storage_error",
            ApiError::Validation(_) => "validation_failed",
            ApiError::BadPayload(_) => "invalid_query",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Request rejected ({}): {}", self.label(), self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}
