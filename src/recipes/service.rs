use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};

use crate::categories::{category_not_found, Category, CategoryRepository};
use crate::error::ApiError;
use crate::query::{ListParams, QueryValidator};
use crate::recipes::{Recipe, RecipeList, RecipeRepository, RecipeRequest, RecipeResponse};

/// Recipes per page when the client sends no `per_page`
pub const DEFAULT_PER_PAGE: u32 = 5;

/// Category-scoped recipe operations
///
/// Every operation first resolves the parent category against the caller,
/// so a foreign category looks exactly like a missing one.
#[derive(Clone)]
pub struct RecipeService {
    pool: PgPool,
}

impl RecipeService {
    /// Create a new RecipeService
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a recipe in one of the owner's categories
    pub async fn create(
        &self,
        owner_id: i32,
        category_id: i32,
        request: RecipeRequest,
    ) -> Result<Recipe, ApiError> {
        let mut tx = self.pool.begin().await?;
        owned_category(&mut *tx, owner_id, category_id).await?;

        let input = request.normalize()?;
        if RecipeRepository::name_taken(&mut *tx, category_id, &input.name).await? {
            warn!(category_id, name = %input.name, "Duplicate recipe");
            return Err(ApiError::conflict("Recipe already exists"));
        }
        let recipe = RecipeRepository::create(&mut *tx, category_id, &input).await?;
        tx.commit().await?;

        info!(owner_id, category_id, recipe_id = recipe.id, "Recipe created");
        Ok(recipe)
    }

    /// List a category's recipes, optionally filtered by name
    ///
    /// An empty page is a 404, not an empty list.
    pub async fn list(
        &self,
        owner_id: i32,
        category_id: i32,
        params: ListParams,
    ) -> Result<RecipeList, ApiError> {
        let query = QueryValidator::validate(params, DEFAULT_PER_PAGE)?;

        let mut conn = self.pool.acquire().await?;
        owned_category(&mut *conn, owner_id, category_id).await?;
        let (recipes, total) = RecipeRepository::list(&mut *conn, category_id, &query).await?;
        debug!(category_id, total, returned = recipes.len(), "Listed recipes");

        if recipes.is_empty() {
            return Err(ApiError::not_found("Recipe", "No recipe found"));
        }

        Ok(RecipeList {
            recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
            page: query.page,
            per_page: query.per_page,
            total,
        })
    }

    /// Fetch one recipe
    pub async fn get(&self, owner_id: i32, category_id: i32, id: i32) -> Result<Recipe, ApiError> {
        let mut conn = self.pool.acquire().await?;
        owned_category(&mut *conn, owner_id, category_id).await?;

        RecipeRepository::find_by_id(&mut *conn, category_id, id)
            .await?
            .ok_or_else(recipe_not_found)
    }

    /// Replace a recipe's fields
    ///
    /// The new name must not already exist in the category, the recipe's current name included.
    pub async fn update(
        &self,
        owner_id: i32,
        category_id: i32,
        id: i32,
        request: RecipeRequest,
    ) -> Result<Recipe, ApiError> {
        let mut tx = self.pool.begin().await?;
        owned_category(&mut *tx, owner_id, category_id).await?;

        let input = request.normalize()?;
        if RecipeRepository::find_by_id(&mut *tx, category_id, id)
            .await?
            .is_none()
        {
            return Err(recipe_not_found());
        }
        if RecipeRepository::name_taken(&mut *tx, category_id, &input.name).await? {
            warn!(category_id, recipe_id = id, name = %input.name, "Recipe name already taken");
            return Err(ApiError::conflict("Recipe already exists"));
        }
        let recipe = RecipeRepository::update(&mut *tx, category_id, id, &input)
            .await?
            .ok_or_else(recipe_not_found)?;
        tx.commit().await?;

        info!(owner_id, category_id, recipe_id = id, "Recipe updated");
        Ok(recipe)
    }

    /// Delete one recipe
    pub async fn delete(&self, owner_id: i32, category_id: i32, id: i32) -> Result<Recipe, ApiError> {
        let mut tx = self.pool.begin().await?;
        owned_category(&mut *tx, owner_id, category_id).await?;

        let recipe = RecipeRepository::delete(&mut *tx, category_id, id)
            .await?
            .ok_or_else(recipe_not_found)?;
        tx.commit().await?;

        info!(owner_id, category_id, recipe_id = id, "Recipe deleted");
        Ok(recipe)
    }
}

async fn owned_category(
    conn: &mut PgConnection,
    owner_id: i32,
    category_id: i32,
) -> Result<Category, ApiError> {
    CategoryRepository::find_by_id(conn, owner_id, category_id)
        .await?
        .ok_or_else(category_not_found)
}

fn recipe_not_found() -> ApiError {
    ApiError::not_found("Recipe", "Recipe not found")
}
