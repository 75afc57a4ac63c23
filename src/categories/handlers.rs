// HTTP handlers for category endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::auth::middleware::AuthenticatedUser;
use crate::categories::{CategoryEnvelope, CategoryList, CategoryRequest, CategoryResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::MessageResponse;
use crate::query::ListParams;
use crate::state::AppState;

/// Handler for POST /api/v1/categories/
pub async fn create_category_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(request): ApiJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryEnvelope>), ApiError> {
    tracing::debug!("Creating category for user {}", user.user_id);

    let category = state.category_service.create(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryEnvelope {
            message: format!("Category {} has been created", category.name),
            category: category.into(),
        }),
    ))
}

/// Handler for GET /api/v1/categories/?q=&page=&per_page=
pub async fn list_categories_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<CategoryList>, ApiError> {
    let list = state.category_service.list(user.user_id, params).await?;
    Ok(Json(list))
}

/// Handler for GET /api/v1/categories/:category_id
pub async fn get_category_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(category_id): ApiPath<i32>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .category_service
        .get(user.user_id, category_id)
        .await?;

    Ok(Json(category.into()))
}

/// Handler for PUT /api/v1/categories/:category_id
pub async fn update_category_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(category_id): ApiPath<i32>,
    ApiJson(request): ApiJson<CategoryRequest>,
) -> Result<Json<CategoryEnvelope>, ApiError> {
    tracing::debug!("Updating category {} for user {}", category_id, user.user_id);

    let category = state
        .category_service
        .update(user.user_id, category_id, request)
        .await?;

    Ok(Json(CategoryEnvelope {
        message: format!("Category {} has been updated", category.name),
        category: category.into(),
    }))
}

/// Handler for DELETE /api/v1/categories/:category_id
pub async fn delete_category_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(category_id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let category = state
        .category_service
        .delete(user.user_id, category_id)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "Category {} deleted",
        category.name
    ))))
}
