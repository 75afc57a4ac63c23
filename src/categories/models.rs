use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::ApiError;
use crate::validation::validate_name;

/// Category database model
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category_id: i32,
    pub categoryname: String,
    pub category_description: String,
    pub created_by: i32,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.id,
            categoryname: category.name,
            category_description: category.description,
            created_by: category.owner_id,
            date_created: category.created_at,
            date_modified: category.updated_at,
        }
    }
}

/// Body of create and update requests
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub categoryname: String,
    /// Omitted means empty; present but blank is rejected
    pub category_description: Option<String>,
}

/// Normalized category fields, ready to store
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CategoryInput {
    #[validate(custom = "validate_name")]
    pub name: String,
    pub description: String,
}

impl CategoryRequest {
    /// Trim and lowercase the name, trim the description, then validate
    pub fn normalize(self) -> Result<CategoryInput, ApiError> {
        let name = self.categoryname.trim().to_lowercase();
        if name.is_empty() {
            return Err(ApiError::validation("Please enter a categoryname"));
        }

        let description = match self.category_description {
            Some(description) => {
                let description = description.trim().to_string();
                if description.is_empty() {
                    return Err(ApiError::validation("Please enter a category description"));
                }
                description
            }
            None => String::new(),
        };

        let input = CategoryInput { name, description };
        input.validate().map_err(|_| {
            ApiError::validation(
                "Please enter valid categoryname with no spaces, numbers and special characters",
            )
        })?;
        Ok(input)
    }
}

/// Response for create and update
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryEnvelope {
    pub message: String,
    pub category: CategoryResponse,
}

/// One page of a category listing
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<CategoryResponse>,
    pub page: u32,
    pub per_page: u32,
    /// Matching categories across all pages
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, description: Option<&str>) -> CategoryRequest {
        CategoryRequest {
            categoryname: name.to_string(),
            category_description: description.map(str::to_string),
        }
    }

    fn message_of(err: ApiError) -> String {
        match err {
            ApiError::ValidationError(message) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        let input = request("  Salad ", Some("  greens ")).normalize().unwrap();
        assert_eq!(input.name, "salad");
        assert_eq!(input.description, "greens");
    }

    #[test]
    fn test_name_only_request_is_accepted() {
        let request: CategoryRequest = serde_json::from_str(r#"{"categoryname": "salad"}"#).unwrap();
        let input = request.normalize().unwrap();
        assert_eq!(input.description, "");
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        assert_eq!(
            message_of(request("   ", Some("x")).normalize().unwrap_err()),
            "Please enter a categoryname"
        );
        assert_eq!(
            message_of(request("salad", Some("  ")).normalize().unwrap_err()),
            "Please enter a category description"
        );
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        for name in ["boiled rice", "salad2", "salad!"] {
            let message = message_of(request(name, None).normalize().unwrap_err());
            assert!(message.starts_with("Please enter valid categoryname"));
        }
    }

    #[test]
    fn test_response_uses_wire_names() {
        let now = Utc::now();
        let response = CategoryResponse::from(Category {
            id: 3,
            name: "salad".into(),
            description: "greens".into(),
            owner_id: 7,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["category_id"], 3);
        assert_eq!(json["categoryname"], "salad");
        assert_eq!(json["category_description"], "greens");
        assert_eq!(json["created_by"], 7);
    }
}
