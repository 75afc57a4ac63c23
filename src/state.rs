// Shared application state

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::{AuthService, BlacklistRepository, TokenBlacklist, TokenService, UserRepository};
use crate::categories::CategoryService;
use crate::config::AppConfig;
use crate::recipes::RecipeService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth_service: Arc<AuthService>,
    pub category_service: CategoryService,
    pub recipe_service: RecipeService,
}

impl AppState {
    /// Wire services over a pool with the PostgreSQL token blacklist
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        let blacklist = Arc::new(BlacklistRepository::new(db.clone()));
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_seconds);
        Self::with_blacklist(db, blacklist, tokens)
    }

    /// Wire services with a caller-supplied blacklist
    pub fn with_blacklist(
        db: PgPool,
        blacklist: Arc<dyn TokenBlacklist>,
        tokens: TokenService,
    ) -> Self {
        let auth_service = AuthService::new(UserRepository::new(db.clone()), blacklist, tokens);
        Self {
            auth_service: Arc::new(auth_service),
            category_service: CategoryService::new(db.clone()),
            recipe_service: RecipeService::new(db.clone()),
            db,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth_service.clone()
    }
}
