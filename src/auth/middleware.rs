// Authentication gate for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, service::AuthService};

/// Authenticated user extractor for protected routes
///
/// Adding this as a handler argument puts the route behind the token gate.
/// The raw token is kept so logout can revoke exactly what was presented.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub token: String,
}

/// Extract the token from an `Authorization: Bearer <token>` value
///
/// The scheme is matched case-insensitively. A value with no space, another
/// scheme, or an empty token is malformed.
pub fn parse_bearer(value: &str) -> Result<&str, AuthError> {
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MalformedHeader)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let endpoint = parts.uri.path();

        let header_value = parts.headers.get(header::AUTHORIZATION).ok_or_else(|| {
            debug!("Missing Authorization header for endpoint: {}", endpoint);
            AuthError::MissingToken
        })?;

        let raw = header_value.to_str().map_err(|_| {
            warn!("Non-ASCII Authorization header for endpoint: {}", endpoint);
            AuthError::MalformedHeader
        })?;
        let token = parse_bearer(raw)?;

        let service = Arc::<AuthService>::from_ref(state);
        let user_id = service.check_token(token).await?.into_result()?;

        debug!(user_id, "Authenticated request to {}", endpoint);
        Ok(AuthenticatedUser {
            user_id,
            token: token.to_string(),
        })
    }
}
