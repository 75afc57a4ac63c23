// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::{validate_email_shape, validate_password_chars};

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub security_question: String,
    pub security_answer_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User response model (excludes password and answer hashes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub security_question: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            security_question: user.security_question,
            created_at: user.created_at,
        }
    }
}

/// Registration request DTO
///
/// Missing fields deserialize as empty strings so the "all fields are required"
/// check reports them instead of a JSON rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom = "validate_email_shape")]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 6, message = "Enter a password with more than 6 characters"),
        custom = "validate_password_chars"
    )]
    pub password: String,
    #[serde(default)]
    pub security_question: String,
    #[serde(default)]
    pub security_answer: String,
}

/// Login request DTO
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Password reset request DTO, gated by the security question and answer
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 6, message = "Enter a password with more than 6 characters"),
        custom = "validate_password_chars"
    )]
    pub new_password: String,
    #[serde(default)]
    pub security_question: String,
    #[serde(default)]
    pub security_answer: String,
}

/// Successful login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Successful registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_missing_fields_default_to_empty() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"email": "u@test.com", "password": "test1234"}"#).unwrap();
        assert_eq!(request.security_question, "");
        assert_eq!(request.security_answer, "");
    }

    #[test]
    fn test_register_request_validation() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"email": "u@test", "password": "abc", "security_question": "q", "security_answer": "a"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_user_response_omits_hashes() {
        let user = User {
            id: 1,
            email: "u@test.com".into(),
            password_hash: "$argon2id$secret".into(),
            security_question: "First pet?".into(),
            security_answer_hash: "$argon2id$answer".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(json.contains("u@test.com"));
        assert!(!json.contains("argon2"));
    }
}
