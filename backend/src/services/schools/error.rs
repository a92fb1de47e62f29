use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use crate::aggregation::ServiceError;

/// Errors returned to API clients. The `Display` text is the message sent in
/// the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("School with id {0} not found.")]
    SchoolNotFound(i64),

    #[error("Unexpected error during school creation.")]
    CreationFailed,

    #[error("Unexpected error while accessing school storage.")]
    Internal,

    #[error("Unexpected error while encoding the response.")]
    Serialization(#[from] serde_json::Error),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::PersistenceFailure { source: Some(cause) } => {
                error!("school creation failed: {}", cause);
                ApiError::CreationFailed
            }
            ServiceError::PersistenceFailure { source: None } => {
                error!("school creation failed: storage assigned no identity");
                ApiError::CreationFailed
            }
            ServiceError::Storage(cause) => {
                error!("school storage failure: {}", cause);
                ApiError::Internal
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SchoolNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::CreationFailed | ApiError::Internal | ApiError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or_default(),
            "message": self.to_string(),
        }))
    }
}
