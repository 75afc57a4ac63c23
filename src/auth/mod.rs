// Authentication module
// Registration, login, logout and password reset over bearer tokens with a revocation blacklist

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{
    change_password_handler, login_handler, logout_handler, me_handler, register_handler,
};
pub use middleware::AuthenticatedUser;
pub use models::{LoginRequest, RegisterRequest, User, UserResponse};
pub use repository::{BlacklistRepository, TokenBlacklist, UserRepository};
pub use service::{AuthService, TokenCheck};
pub use token::TokenService;

/// Routes mounted under /api/v1/auth
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/change_password", post(change_password_handler))
        .route("/me", get(me_handler))
}
