// Password hashing service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Security answers go through the same hashing as passwords.
pub struct PasswordService;

impl PasswordService {
    /// Hash a secret using Argon2id with a random salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                AuthError::PasswordHashError
            })
    }

    /// Verify a secret against a stored PHC hash string
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            AuthError::PasswordHashError
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Security answers compare case- and whitespace-insensitively
pub fn normalize_security_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}
