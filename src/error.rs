use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// Crate-wide error returned by services and handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Class is full")]
    ClassFull,
    #[error("Class is already booked")]
    AlreadyBooked,
    #[error("Class is not open for booking")]
    ClassNotBookable,
    #[error("{0}")]
    Conflict(String),
    #[error("Generative AI is not configured")]
    AiNotConfigured,
    #[error("Upstream service error: {0}")]
    Upstream(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(err) => err.status_code(),
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ClassFull
            | AppError::AlreadyBooked
            | AppError::ClassNotBookable
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::AiNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Auth(err) => err.error_code(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ClassFull => "CLASS_FULL",
            AppError::AlreadyBooked => "ALREADY_BOOKED",
            AppError::ClassNotBookable => "CLASS_NOT_BOOKABLE",
            AppError::Conflict(_) => "CONFLICT",
            AppError::AiNotConfigured => "AI_NOT_CONFIGURED",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Auth(err) = self {
            return err.into_response();
        }

        let status = self.status_code();

        let body = match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                json!({
                    "error": self.error_code(),
                    "message": "Internal server error",
                })
            }
            AppError::Upstream(details) => {
                tracing::warn!(details = %details, "upstream service call failed");
                json!({
                    "error": self.error_code(),
                    "message": self.to_string(),
                    "response": "I apologize, but I encountered an error. Please try again.",
                })
            }
            _ => json!({
                "error": self.error_code(),
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
