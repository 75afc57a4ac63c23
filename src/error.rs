// Error handling module for the Recipes API
// Provides centralized error types and HTTP response conversion

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// Main error type for the API
/// All resource handlers return Result<T, ApiError>
///
/// Each variant maps to a specific HTTP status code and error response format.
#[derive(Debug)]
pub enum ApiError {
    /// A field failed a shape or emptiness check
    /// Maps to HTTP 400 Bad Request
    ValidationError(String),

    /// Resource absent, or owned by someone other than the caller
    /// Maps to HTTP 404 Not Found
    NotFound { resource: String, message: String },

    /// Duplicate name within an owner or category scope
    /// Maps to HTTP 409 Conflict
    Conflict { message: String },

    /// Database operation errors
    /// Maps to HTTP 500; details are logged, never returned
    DatabaseError(sqlx::Error),
}

/// Consistent error response structure shared by every error type
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "NOT_FOUND")
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.to_string(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    pub fn not_found(resource: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Logging follows severity: debug for expected client errors,
    /// warn for conflicts, error for anything that becomes a 500.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(message) => {
                debug!("Validation error: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("VALIDATION_ERROR", message.clone()),
                )
            }
            ApiError::NotFound { resource, message } => {
                debug!("{} not found: {}", resource, message);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("NOT_FOUND", message.clone()),
                )
            }
            ApiError::Conflict { message } => {
                warn!("Conflict error: {}", message);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("CONFLICT", message.clone()),
                )
            }
            ApiError::DatabaseError(db_error) => {
                error!("Database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("DATABASE_ERROR", "A database error occurred"),
                )
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::DatabaseError(error)
    }
}

// Extractor rejections become 400s in the shared JSON shape

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

/// True if the error is a unique-constraint violation
///
/// Used to turn insert races on scoped names into the same conflict the pre-check reports.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Fallback for unknown paths
pub async fn handle_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", "Requested URL was not found")),
    )
}

/// Rewrites the router's bare 405 responses into the JSON error format
///
/// Installed with `axum::middleware::map_response`; all other responses pass through.
pub async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    parts.headers.remove(axum::http::header::CONTENT_TYPE);
    let body = Json(ErrorResponse::new(
        "METHOD_NOT_ALLOWED",
        "Requested URL is invalid",
    ));
    (parts, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_is_400() {
        let (status, body) = body_of(ApiError::validation("Please enter a categoryname")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_code, "VALIDATION_ERROR");
        assert_eq!(body.message, "Please enter a categoryname");
    }

    #[tokio::test]
    async fn test_not_found_and_conflict_statuses() {
        let (status, body) = body_of(ApiError::not_found("Category", "No category found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error_code, "NOT_FOUND");

        let (status, body) = body_of(ApiError::conflict("Category already exists")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.message, "Category already exists");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let (status, body) = body_of(ApiError::DatabaseError(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "A database error occurred");
        assert!(!body.message.contains("RowNotFound"));
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::DatabaseError(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::conflict("Recipe already exists").status_code(),
            StatusCode::CONFLICT
        );
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
