// List queries: search, pagination and the SQL they build

use serde::Deserialize;

use crate::error::ApiError;

/// Largest page a client may request
pub const MAX_PER_PAGE: u32 = 100;

/// SQL query builder for scoped list queries
///
/// Every query is restricted to one scope (an owner or a parent category)
/// bound as `$1`; text filters are bound after it in the order added.
pub struct SQLQueryBuilder {
    table: &'static str,
    columns: &'static str,
    scope_column: &'static str,
    where_clauses: Vec<String>,
    params: Vec<String>,
    limit: u32,
    offset: u64,
}

impl SQLQueryBuilder {
    /// Creates a builder selecting `columns` from `table` where `scope_column = $1`
    pub fn new(table: &'static str, columns: &'static str, scope_column: &'static str) -> Self {
        Self {
            table,
            columns,
            scope_column,
            where_clauses: Vec::new(),
            params: Vec::new(),
            limit: 10,
            offset: 0,
        }
    }

    /// Adds a search filter for partial name matching (case-insensitive)
    /// LIKE wildcards in the search term match literally
    pub fn add_search_filter(&mut self, search: &str) {
        let param_index = self.params.len() + 2;
        self.where_clauses.push(format!("name ILIKE ${}", param_index));
        self.params.push(format!("%{}%", escape_like(search)));
    }

    /// Sets pagination parameters
    /// Calculates LIMIT and OFFSET based on page number and page size
    pub fn set_pagination(&mut self, page: u32, per_page: u32) {
        self.limit = per_page;
        self.offset = u64::from(page.saturating_sub(1)) * u64::from(per_page);
    }

    fn where_sql(&self) -> String {
        let mut clause = format!(" WHERE {} = $1", self.scope_column);
        for filter in &self.where_clauses {
            clause.push_str(" AND ");
            clause.push_str(filter);
        }
        clause
    }

    /// Builds the page query
    /// Returns the SQL and the text parameters to bind after the scope id
    pub fn build(&self) -> (String, Vec<String>) {
        let mut query = format!("SELECT {} FROM {}", self.columns, self.table);
        query.push_str(&self.where_sql());
        query.push_str(" ORDER BY id");

        // Integers go straight into the SQL; PostgreSQL rejects text for LIMIT
        query.push_str(&format!(" LIMIT {}", self.limit));
        query.push_str(&format!(" OFFSET {}", self.offset));

        (query, self.params.clone())
    }

    /// Builds the matching COUNT query over the same filters, ignoring pagination
    pub fn build_count(&self) -> (String, Vec<String>) {
        let mut query = format!("SELECT COUNT(*) FROM {}", self.table);
        query.push_str(&self.where_sql());
        (query, self.params.clone())
    }
}

/// Escape `\`, `%` and `_` so they match themselves in a LIKE pattern
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Query parameters extracted from HTTP request
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Search term for partial name matching (case-insensitive)
    pub q: Option<String>,
    /// Page number (1-indexed, defaults to 1)
    pub page: Option<u32>,
    /// Items per page
    pub per_page: Option<u32>,
}

/// Validated and normalized list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    /// Normalized search term (trimmed, None if empty)
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl ValidatedQuery {
    /// A builder for this page of the given scoped table
    pub fn builder(
        &self,
        table: &'static str,
        columns: &'static str,
        scope_column: &'static str,
    ) -> SQLQueryBuilder {
        let mut builder = SQLQueryBuilder::new(table, columns, scope_column);
        if let Some(ref search) = self.search {
            builder.add_search_filter(search);
        }
        builder.set_pagination(self.page, self.per_page);
        builder
    }
}

/// Query parameter validator
pub struct QueryValidator;

impl QueryValidator {
    /// Validates and normalizes list parameters
    /// `default_per_page` applies when the client sends none
    pub fn validate(params: ListParams, default_per_page: u32) -> Result<ValidatedQuery, ApiError> {
        let search = Self::normalize_string(params.q);

        let page = match params.page {
            Some(p) => {
                Self::validate_pagination_param(p, "page")?;
                p
            }
            None => 1,
        };

        let per_page = match params.per_page {
            Some(n) => {
                Self::validate_pagination_param(n, "per_page")?;
                if n > MAX_PER_PAGE {
                    return Err(ApiError::validation(format!(
                        "per_page must not exceed {}",
                        MAX_PER_PAGE
                    )));
                }
                n
            }
            None => default_per_page,
        };

        Ok(ValidatedQuery {
            search,
            page,
            per_page,
        })
    }

    /// Normalizes string parameters by trimming whitespace
    /// Returns None if the string is empty or whitespace-only
    fn normalize_string(s: Option<String>) -> Option<String> {
        s.and_then(|s| {
            let trimmed = s.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    /// Validates pagination parameters (page and per_page)
    /// Must be positive (not zero)
    fn validate_pagination_param(value: u32, param_name: &str) -> Result<(), ApiError> {
        if value == 0 {
            return Err(ApiError::validation(format!(
                "{} must be a positive number (greater than 0)",
                param_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn category_builder() -> SQLQueryBuilder {
        SQLQueryBuilder::new("categories", "id, name", "owner_id")
    }

    #[test]
    fn test_sql_builder_basic_query() {
        let builder = category_builder();
        let (query, params) = builder.build();

        assert!(query.starts_with("SELECT id, name FROM categories WHERE owner_id = $1"));
        assert!(query.contains("ORDER BY id"));
        assert!(query.contains("LIMIT 10"));
        assert!(query.contains("OFFSET 0"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_sql_builder_with_search() {
        let mut builder = category_builder();
        builder.add_search_filter("sal");
        let (query, params) = builder.build();

        assert!(query.contains("WHERE owner_id = $1 AND name ILIKE $2"));
        assert_eq!(params, vec!["%sal%".to_string()]);
    }

    #[test]
    fn test_search_is_applied_before_pagination() {
        let mut builder = category_builder();
        builder.add_search_filter("sal");
        builder.set_pagination(2, 5);
        let (query, _) = builder.build();

        let filter_at = query.find("ILIKE").unwrap();
        let limit_at = query.find("LIMIT").unwrap();
        assert!(filter_at < limit_at);
        assert!(query.ends_with("LIMIT 5 OFFSET 5"));
    }

    #[test]
    fn test_count_query_shares_filters_without_pagination() {
        let mut builder = SQLQueryBuilder::new("recipes", "*", "category_id");
        builder.add_search_filter("rice");
        builder.set_pagination(3, 20);
        let (query, params) = builder.build_count();

        assert_eq!(
            query,
            "SELECT COUNT(*) FROM recipes WHERE category_id = $1 AND name ILIKE $2"
        );
        assert_eq!(params, vec!["%rice%".to_string()]);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("sal"), "sal");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_validate_defaults() {
        let validated = QueryValidator::validate(ListParams::default(), 10).unwrap();
        assert_eq!(validated.page, 1);
        assert_eq!(validated.per_page, 10);
        assert_eq!(validated.search, None);

        let validated = QueryValidator::validate(ListParams::default(), 5).unwrap();
        assert_eq!(validated.per_page, 5);
    }

    #[test]
    fn test_normalize_string() {
        assert_eq!(
            QueryValidator::normalize_string(Some("  sal  ".to_string())),
            Some("sal".to_string())
        );
        assert_eq!(QueryValidator::normalize_string(Some("   ".to_string())), None);
        assert_eq!(QueryValidator::normalize_string(None), None);
    }

    #[test]
    fn test_zero_page_and_per_page_are_rejected() {
        let params = ListParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(QueryValidator::validate(params, 10).is_err());

        let params = ListParams {
            per_page: Some(0),
            ..Default::default()
        };
        assert!(QueryValidator::validate(params, 10).is_err());
    }

    #[test]
    fn test_per_page_is_capped() {
        let params = ListParams {
            per_page: Some(MAX_PER_PAGE),
            ..Default::default()
        };
        assert!(QueryValidator::validate(params, 10).is_ok());

        let params = ListParams {
            per_page: Some(MAX_PER_PAGE + 1),
            ..Default::default()
        };
        let err = QueryValidator::validate(params, 10).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validated_query_builder_applies_everything() {
        let validated = QueryValidator::validate(
            ListParams {
                q: Some(" Sal ".to_string()),
                page: Some(2),
                per_page: Some(3),
            },
            10,
        )
        .unwrap();
        let (query, params) = validated.builder("categories", "*", "owner_id").build();

        assert!(query.contains("name ILIKE $2"));
        assert!(query.ends_with("LIMIT 3 OFFSET 3"));
        assert_eq!(params, vec!["%Sal%".to_string()]);
    }

    proptest! {
        #[test]
        fn prop_offset_never_overflows(page in 1u32.., per_page in 1u32..=MAX_PER_PAGE) {
            let mut builder = category_builder();
            builder.set_pagination(page, per_page);
            let (query, _) = builder.build();
            let expected = u64::from(page - 1) * u64::from(per_page);
            let expected_suffix = format!("OFFSET {}", expected);
            prop_assert!(query.ends_with(&expected_suffix));
        }
    }
}
