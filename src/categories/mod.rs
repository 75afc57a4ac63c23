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

/// Category and recipe routes
///
/// Listed with full paths: the collection lives at a trailing-slash URL.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/categories/",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/api/v1/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/api/v1/categories/:category_id",
            get(get_category_handler)
                .put(update_category_handler)
                .delete(delete_category_handler),
        )
        .merge(crate::recipes::router())
}
