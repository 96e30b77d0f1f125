use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use dictation_application::ApplicationError;
use dictation_domain::DomainError;

#[derive(Debug)]
pub enum HttpError {
    Validation { code: &'static str, message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { code: &'static str, message: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            HttpError::Validation { code, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, code, message)
            }
            HttpError::NotFound { message } => (StatusCode::NOT_FOUND, "not_found", message),
            HttpError::Conflict { message } => (StatusCode::CONFLICT, "conflict", message),
            HttpError::Internal { code, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
        };

        (
            status,
            Json(json!({
                "code": code,
                "error": message,
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    let message = error.to_string();
    match &error {
        ApplicationError::Validation(_) => HttpError::Validation {
            code: error.code(),
            message,
        },
        ApplicationError::Domain(domain) => match domain {
            DomainError::InvalidInput { .. } | DomainError::InvalidRange { .. } => {
                HttpError::Validation {
                    code: error.code(),
                    message,
                }
            }
            DomainError::NotFound { .. } => HttpError::NotFound { message },
            DomainError::Conflict { .. } => HttpError::Conflict { message },
            DomainError::Conversion { .. }
            | DomainError::Storage { .. }
            | DomainError::Internal { .. } => HttpError::Internal {
                code: error.code(),
                message,
            },
        },
        ApplicationError::Internal(_) => HttpError::Internal {
            code: error.code(),
            message,
        },
    }
}
