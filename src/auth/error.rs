// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::error::ErrorResponse;

/// Authentication error types
///
/// Every token failure is a 401; only the message tells the client which check failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid email or security answer")]
    InvalidSecurityAnswer,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token has been revoked")]
    RevokedToken,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Password hashing error")]
    PasswordHashError,

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.to_error_response())).into_response()
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::InvalidSecurityAnswer
            | AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::RevokedToken => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a descriptive error message for this error
    /// This message is safe to send to clients (no sensitive data)
    pub fn error_message(&self) -> String {
        match self {
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::InvalidCredentials => {
                "Invalid email or password, Please try again".to_string()
            }
            AuthError::InvalidSecurityAnswer => "Invalid email or security answer".to_string(),
            AuthError::MissingToken => "No token provided, Please login".to_string(),
            AuthError::MalformedHeader => {
                "Malformed authorization header, expected 'Bearer <token>'".to_string()
            }
            AuthError::InvalidToken => "Invalid token, Please login again".to_string(),
            AuthError::ExpiredToken => "Token has expired, Please login again".to_string(),
            AuthError::RevokedToken => "Token has been revoked, Please login again".to_string(),
            AuthError::EmailAlreadyExists => {
                "Email already exists. Please use another one".to_string()
            }
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => "Internal server error".to_string(),
        }
    }

    pub(crate) fn to_error_response(&self) -> ErrorResponse {
        let code = match self {
            AuthError::ValidationError(_) => "VALIDATION_ERROR",
            AuthError::EmailAlreadyExists => "CONFLICT",
            AuthError::DatabaseError(msg) => {
                error!("Database error in auth: {}", msg);
                "INTERNAL_ERROR"
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
                "INTERNAL_ERROR"
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
                "INTERNAL_ERROR"
            }
            other => {
                warn!("Authentication failed: {}", other);
                "UNAUTHORIZED"
            }
        };
        ErrorResponse::new(code, self.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_are_all_401() {
        for err in [
            AuthError::MissingToken,
            AuthError::MalformedHeader,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::RevokedToken,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_messages_distinguish_failures() {
        assert_ne!(
            AuthError::ExpiredToken.error_message(),
            AuthError::RevokedToken.error_message()
        );
        assert_eq!(
            AuthError::MissingToken.error_message(),
            "No token provided, Please login"
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AuthError::DatabaseError("connection refused at 10.0.0.3".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_message(), "Internal server error");
        assert_eq!(err.to_error_response().error_code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        assert_eq!(AuthError::EmailAlreadyExists.status_code(), StatusCode::CONFLICT);
    }
}
