use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::password::PasswordError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User with this email already exists")]
    EmailAlreadyExists,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("Insufficient permissions")]
    InsufficientPermissions,
    #[error("Account is awaiting approval")]
    AccountNotApproved,
    #[error("{0}")]
    PasswordValidation(String),
    #[error("{0}")]
    EmailValidation(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(PasswordError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeaderFormat
            | AuthError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions | AuthError::AccountNotApproved => {
                StatusCode::FORBIDDEN
            }
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::PasswordValidation(_) | AuthError::EmailValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Database(_) | AuthError::PasswordHashing(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AuthError::InvalidToken | AuthError::Jwt(_) => "INVALID_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeaderFormat => "UNAUTHORIZED",
            AuthError::InsufficientPermissions => "FORBIDDEN",
            AuthError::AccountNotApproved => "ACCOUNT_NOT_APPROVED",
            AuthError::PasswordValidation(_) | AuthError::EmailValidation(_) => "VALIDATION_ERROR",
            AuthError::Database(_) => "DATABASE_ERROR",
            AuthError::PasswordHashing(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        if err.is_policy_violation() {
            AuthError::PasswordValidation(err.to_string())
        } else {
            AuthError::PasswordHashing(err)
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "authentication failure");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": self.error_code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}
