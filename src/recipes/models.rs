use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::ApiError;
use crate::validation::validate_name;

/// Recipe database model
#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recipe as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe_id: i32,
    pub recipename: String,
    pub recipe_description: String,
    pub instructions: String,
    pub category_id: i32,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            recipe_id: recipe.id,
            recipename: recipe.name,
            recipe_description: recipe.description,
            instructions: recipe.instructions,
            category_id: recipe.category_id,
            date_created: recipe.created_at,
            date_modified: recipe.updated_at,
        }
    }
}

/// Body of create and update requests
#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub recipename: String,
    #[serde(default)]
    pub recipe_description: String,
    #[serde(default)]
    pub instructions: String,
}

/// Normalized recipe fields, ready to store
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct RecipeInput {
    #[validate(custom = "validate_name")]
    pub name: String,
    pub description: String,
    pub instructions: String,
}

impl RecipeRequest {
    /// Trim and lowercase the name, trim the text fields, then validate
    pub fn normalize(self) -> Result<RecipeInput, ApiError> {
        let name = self.recipename.trim().to_lowercase();
        if name.is_empty() {
            return Err(ApiError::validation("Please enter a recipename"));
        }
        let description = self.recipe_description.trim().to_string();
        if description.is_empty() {
            return Err(ApiError::validation("Please enter a recipe description"));
        }

        let input = RecipeInput {
            name,
            description,
            instructions: self.instructions.trim().to_string(),
        };
        input.validate().map_err(|_| {
            ApiError::validation(
                "Please enter valid recipename with no spaces, numbers and special characters",
            )
        })?;
        Ok(input)
    }
}

/// Response for create and update
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeEnvelope {
    pub message: String,
    pub recipe: RecipeResponse,
}

/// One page of a recipe listing
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeList {
    pub recipes: Vec<RecipeResponse>,
    pub page: u32,
    pub per_page: u32,
    /// Matching recipes across all pages
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> RecipeRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_instructions_are_optional() {
        let input = parse(r#"{"recipename": " Biryani ", "recipe_description": "rice"}"#)
            .normalize()
            .unwrap();
        assert_eq!(input.name, "biryani");
        assert_eq!(input.description, "rice");
        assert_eq!(input.instructions, "");
    }

    #[test]
    fn test_description_is_required() {
        let err = parse(r#"{"recipename": "biryani"}"#).normalize().unwrap_err();
        assert!(matches!(
            err,
            ApiError::ValidationError(ref m) if m == "Please enter a recipe description"
        ));
    }

    #[test]
    fn test_name_checks() {
        let err = parse(r#"{"recipename": "  ", "recipe_description": "x"}"#)
            .normalize()
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::ValidationError(ref m) if m == "Please enter a recipename"
        ));

        let err = parse(r#"{"recipename": "fried rice", "recipe_description": "x"}"#)
            .normalize()
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::ValidationError(ref m) if m.starts_with("Please enter valid recipename")
        ));
    }
}
