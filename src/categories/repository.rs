use sqlx::PgConnection;

use crate::categories::{Category, CategoryInput};
use crate::error::{is_unique_violation, ApiError};
use crate::query::ValidatedQuery;

const CATEGORY_COLUMNS: &str = "id, name, description, owner_id, created_at, updated_at";

/// Category queries, all scoped to an owner
///
/// Functions take a connection so callers decide the transaction boundary.
pub struct CategoryRepository;

impl CategoryRepository {
    /// Find a category by ID, only if `owner_id` owns it
    pub async fn find_by_id(
        conn: &mut PgConnection,
        owner_id: i32,
        id: i32,
    ) -> Result<Option<Category>, ApiError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, owner_id, created_at, updated_at
            FROM categories
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(category)
    }

    /// True if the owner already has a category with this name
    pub async fn name_taken(
        conn: &mut PgConnection,
        owner_id: i32,
        name: &str,
    ) -> Result<bool, ApiError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE owner_id = $1 AND name = $2
            )
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exists)
    }

    /// Insert a category
    pub async fn create(
        conn: &mut PgConnection,
        owner_id: i32,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(owner_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(duplicate_name)
    }

    /// Rename and redescribe a category, refreshing `updated_at`
    pub async fn update(
        conn: &mut PgConnection,
        owner_id: i32,
        id: i32,
        input: &CategoryInput,
    ) -> Result<Option<Category>, ApiError> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, description = $2, updated_at = NOW()
            WHERE id = $3 AND owner_id = $4
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(duplicate_name)
    }

    /// Delete a category; its recipes go with it
    pub async fn delete(
        conn: &mut PgConnection,
        owner_id: i32,
        id: i32,
    ) -> Result<Option<Category>, ApiError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            DELETE FROM categories
            WHERE id = $1 AND owner_id = $2
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(category)
    }

    /// One page of the owner's categories and the total number matching
    pub async fn list(
        conn: &mut PgConnection,
        owner_id: i32,
        query: &ValidatedQuery,
    ) -> Result<(Vec<Category>, i64), ApiError> {
        let builder = query.builder("categories", CATEGORY_COLUMNS, "owner_id");

        let (count_sql, params) = builder.build_count();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner_id);
        for param in params {
            count_query = count_query.bind(param);
        }
        let total = count_query.fetch_one(&mut *conn).await?;

        let (sql, params) = builder.build();
        let mut page_query = sqlx::query_as::<_, Category>(&sql).bind(owner_id);
        for param in params {
            page_query = page_query.bind(param);
        }
        let categories = page_query.fetch_all(&mut *conn).await?;

        Ok((categories, total))
    }
}

fn duplicate_name(error: sqlx::Error) -> ApiError {
    if is_unique_violation(&error) {
        ApiError::conflict("Category already exists")
    } else {
        ApiError::from(error)
    }
}
