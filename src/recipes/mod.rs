pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{routing::get, Router};

use crate::state::AppState;

pub use handlers::*;
pub use models::*;
pub use repository::*;
pub use service::*;

/// Recipe routes, nested under a category
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/categories/:category_id/recipes",
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route(
            "/api/v1/categories/:category_id/recipes/:recipe_id",
            get(get_recipe_handler)
                .put(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
}
