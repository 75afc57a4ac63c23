use sqlx::PgConnection;

use crate::error::{is_unique_violation, ApiError};
use crate::query::ValidatedQuery;
use crate::recipes::{Recipe, RecipeInput};

const RECIPE_COLUMNS: &str =
    "id, name, description, instructions, category_id, created_at, updated_at";

/// Recipe queries, all scoped to a parent category
///
/// Callers resolve the category against its owner first.
pub struct RecipeRepository;

impl RecipeRepository {
    /// Find a recipe by ID within a category
    pub async fn find_by_id(
        conn: &mut PgConnection,
        category_id: i32,
        id: i32,
    ) -> Result<Option<Recipe>, ApiError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, instructions, category_id, created_at, updated_at
            FROM recipes
            WHERE id = $1 AND category_id = $2
            "#,
        )
        .bind(id)
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(recipe)
    }

    /// True if the category already has a recipe with this name
    pub async fn name_taken(
        conn: &mut PgConnection,
        category_id: i32,
        name: &str,
    ) -> Result<bool, ApiError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM recipes
                WHERE category_id = $1 AND name = $2
            )
            "#,
        )
        .bind(category_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exists)
    }

    /// Insert a recipe
    pub async fn create(
        conn: &mut PgConnection,
        category_id: i32,
        input: &RecipeInput,
    ) -> Result<Recipe, ApiError> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (name, description, instructions, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, instructions, category_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.instructions)
        .bind(category_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(duplicate_name)
    }

    /// Replace a recipe's fields, refreshing `updated_at`
    pub async fn update(
        conn: &mut PgConnection,
        category_id: i32,
        id: i32,
        input: &RecipeInput,
    ) -> Result<Option<Recipe>, ApiError> {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET name = $1, description = $2, instructions = $3, updated_at = NOW()
            WHERE id = $4 AND category_id = $5
            RETURNING id, name, description, instructions, category_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.instructions)
        .bind(id)
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(duplicate_name)
    }

    /// Delete a recipe
    pub async fn delete(
        conn: &mut PgConnection,
        category_id: i32,
        id: i32,
    ) -> Result<Option<Recipe>, ApiError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            DELETE FROM recipes
            WHERE id = $1 AND category_id = $2
            RETURNING id, name, description, instructions, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(recipe)
    }

    /// One page of the category's recipes and the total number matching
    pub async fn list(
        conn: &mut PgConnection,
        category_id: i32,
        query: &ValidatedQuery,
    ) -> Result<(Vec<Recipe>, i64), ApiError> {
        let builder = query.builder("recipes", RECIPE_COLUMNS, "category_id");

        let (count_sql, params) = builder.build_count();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(category_id);
        for param in params {
            count_query = count_query.bind(param);
        }
        let total = count_query.fetch_one(&mut *conn).await?;

        let (sql, params) = builder.build();
        let mut page_query = sqlx::query_as::<_, Recipe>(&sql).bind(category_id);
        for param in params {
            page_query = page_query.bind(param);
        }
        let recipes = page_query.fetch_all(&mut *conn).await?;

        Ok((recipes, total))
    }
}

fn duplicate_name(error: sqlx::Error) -> ApiError {
    if is_unique_violation(&error) {
        ApiError::conflict("Recipe already exists")
    } else {
        ApiError::from(error)
    }
}
