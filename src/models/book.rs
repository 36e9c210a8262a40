//! Book model and related types

use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// ISBN accepts digits and hyphens only (ISBN-10 and ISBN-13 forms)
static ISBN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d-]+$").unwrap());

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub published_year: i32,
    pub pages: i32,
    pub description: Option<String>,
    pub price: f64,
    /// Id of the user who created the record
    pub added_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 50, message = "Author must be between 1 and 50 characters"))]
    pub author: String,
    #[validate(regex(path = *ISBN_REGEX, message = "ISBN must contain only digits and hyphens"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[validate(range(min = 1000, message = "Published year must be valid"))]
    pub published_year: i32,
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: i32,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
}

/// Update book request (all fields optional, supplied fields are re-validated)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Author must be between 1 and 50 characters"))]
    pub author: Option<String>,
    #[validate(regex(path = *ISBN_REGEX, message = "ISBN must contain only digits and hyphens"))]
    pub isbn: Option<String>,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: Option<String>,
    #[validate(range(min = 1000, message = "Published year must be valid"))]
    pub published_year: Option<i32>,
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: Option<i32>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
}

/// The upper bound is the current calendar year, so it cannot live in the
/// declarative rules and is checked before any store access.
pub fn validate_published_year(year: i32) -> AppResult<()> {
    if year < 1000 {
        return Err(AppError::Validation(
            "Published year must be valid".to_string(),
        ));
    }
    let current_year = Utc::now().year();
    if year > current_year {
        return Err(AppError::Validation(
            "Published year cannot be in the future".to_string(),
        ));
    }
    Ok(())
}
