use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::categories::{Category, CategoryList, CategoryRepository, CategoryRequest, CategoryResponse};
use crate::error::ApiError;
use crate::query::{ListParams, QueryValidator};

/// Categories per page when the client sends no `per_page`
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Owner-scoped category operations
///
/// Each mutation runs in its own transaction; returning early drops it, which rolls back.
#[derive(Clone)]
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    /// Create a new CategoryService
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a category for `owner_id`
    pub async fn create(&self, owner_id: i32, request: CategoryRequest) -> Result<Category, ApiError> {
        let input = request.normalize()?;

        let mut tx = self.pool.begin().await?;
        if CategoryRepository::name_taken(&mut *tx, owner_id, &input.name).await? {
            warn!(owner_id, name = %input.name, "Duplicate category");
            return Err(ApiError::conflict("Category already exists"));
        }
        let category = CategoryRepository::create(&mut *tx, owner_id, &input).await?;
        tx.commit().await?;

        info!(owner_id, category_id = category.id, "Category created");
        Ok(category)
    }

    /// List the owner's categories, optionally filtered by name
    ///
    /// An empty page is a 404, not an empty list.
    pub async fn list(&self, owner_id: i32, params: ListParams) -> Result<CategoryList, ApiError> {
        let query = QueryValidator::validate(params, DEFAULT_PER_PAGE)?;

        let mut conn = self.pool.acquire().await?;
        let (categories, total) = CategoryRepository::list(&mut *conn, owner_id, &query).await?;
        debug!(owner_id, total, returned = categories.len(), "Listed categories");

        if categories.is_empty() {
            return Err(ApiError::not_found("Category", "No category found"));
        }

        Ok(CategoryList {
            categories: categories.into_iter().map(CategoryResponse::from).collect(),
            page: query.page,
            per_page: query.per_page,
            total,
        })
    }

    /// Fetch one of the owner's categories
    pub async fn get(&self, owner_id: i32, id: i32) -> Result<Category, ApiError> {
        let mut conn = self.pool.acquire().await?;
        CategoryRepository::find_by_id(&mut *conn, owner_id, id)
            .await?
            .ok_or_else(category_not_found)
    }

    /// Replace a category's name and description
    ///
    /// The new name must not already exist for the owner, the category's current name included.
    pub async fn update(
        &self,
        owner_id: i32,
        id: i32,
        request: CategoryRequest,
    ) -> Result<Category, ApiError> {
        let input = request.normalize()?;

        let mut tx = self.pool.begin().await?;
        if CategoryRepository::find_by_id(&mut *tx, owner_id, id)
            .await?
            .is_none()
        {
            return Err(category_not_found());
        }
        if CategoryRepository::name_taken(&mut *tx, owner_id, &input.name).await? {
            warn!(owner_id, category_id = id, name = %input.name, "Category name already taken");
            return Err(ApiError::conflict("Category already exists"));
        }
        let category = CategoryRepository::update(&mut *tx, owner_id, id, &input)
            .await?
            .ok_or_else(category_not_found)?;
        tx.commit().await?;

        info!(owner_id, category_id = id, "Category updated");
        Ok(category)
    }

    /// Delete one of the owner's categories with all its recipes
    pub async fn delete(&self, owner_id: i32, id: i32) -> Result<Category, ApiError> {
        let mut tx = self.pool.begin().await?;
        let category = CategoryRepository::delete(&mut *tx, owner_id, id)
            .await?
            .ok_or_else(category_not_found)?;
        tx.commit().await?;

        info!(owner_id, category_id = id, "Category deleted");
        Ok(category)
    }
}

/// Absent and foreign categories look the same to the caller
pub fn category_not_found() -> ApiError {
    ApiError::not_found("Category", "Category not found")
}
