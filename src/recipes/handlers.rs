// HTTP handlers for recipe endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::MessageResponse;
use crate::query::ListParams;
use crate::recipes::{RecipeEnvelope, RecipeList, RecipeRequest, RecipeResponse};
use crate::state::AppState;

/// Handler for POST /api/v1/categories/:category_id/recipes
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(category_id): ApiPath<i32>,
    ApiJson(request): ApiJson<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeEnvelope>), ApiError> {
    tracing::debug!("Creating recipe in category {} for user {}", category_id, user.user_id);

    let recipe = state
        .recipe_service
        .create(user.user_id, category_id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeEnvelope {
            message: format!("Recipe {} has been created", recipe.name),
            recipe: recipe.into(),
        }),
    ))
}

/// Handler for GET /api/v1/categories/:category_id/recipes?q=&page=&per_page=
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(category_id): ApiPath<i32>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<RecipeList>, ApiError> {
    let list = state
        .recipe_service
        .list(user.user_id, category_id, params)
        .await?;

    Ok(Json(list))
}

/// Handler for GET /api/v1/categories/:category_id/recipes/:recipe_id
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath((category_id, recipe_id)): ApiPath<(i32, i32)>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = state
        .recipe_service
        .get(user.user_id, category_id, recipe_id)
        .await?;

    Ok(Json(recipe.into()))
}

/// Handler for PUT /api/v1/categories/:category_id/recipes/:recipe_id
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath((category_id, recipe_id)): ApiPath<(i32, i32)>,
    ApiJson(request): ApiJson<RecipeRequest>,
) -> Result<Json<RecipeEnvelope>, ApiError> {
    tracing::debug!("Updating recipe {} in category {}", recipe_id, category_id);

    let recipe = state
        .recipe_service
        .update(user.user_id, category_id, recipe_id, request)
        .await?;

    Ok(Json(RecipeEnvelope {
        message: format!("Recipe {} has been updated", recipe.name),
        recipe: recipe.into(),
    }))
}

/// Handler for DELETE /api/v1/categories/:category_id/recipes/:recipe_id
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath((category_id, recipe_id)): ApiPath<(i32, i32)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let recipe = state
        .recipe_service
        .delete(user.user_id, category_id, recipe_id)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "Recipe {} deleted",
        recipe.name
    ))))
}
