use crate::app::movie_service::ServiceError;
use crate::domain::movie::ValidationErrors;
use crate::transport::http::types::{MessageResponse, ValidationErrorResponse, MOVIE_NOT_FOUND};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub enum ApiError {
    Validation(ValidationErrors),
    NotFound(String),
    InvalidJson(JsonRejection),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(id) => ApiError::NotFound(id),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::InvalidJson(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(issues = errors.issues.len(), "rejected invalid movie payload");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse {
                        error: errors.issues,
                    }),
                )
                    .into_response()
            }
            ApiError::NotFound(id) => {
                tracing::debug!(%id, "movie not found");
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(MOVIE_NOT_FOUND))).into_response()
            }
            ApiError::InvalidJson(rejection) => (
                rejection.status(),
                Json(MessageResponse::new(format!(
                    "Invalid JSON body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response(),
        }
    }
}
