//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub author_id: i32,
    pub is_available: bool,
}

/// Book with its author embedded for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub author: Author,
    pub is_available: bool,
}

/// Flattened book/author join row
#[derive(Debug, FromRow)]
pub struct BookDetailsRow {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub is_available: bool,
    pub author_id: i32,
    pub author_name: String,
}

impl From<BookDetailsRow> for BookDetails {
    fn from(row: BookDetailsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            genre: row.genre,
            author: Author {
                id: row.author_id,
                name: row.author_name,
            },
            is_available: row.is_available,
        }
    }
}

/// Create book request. The author is resolved by name, created when absent.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub genre: String,
    #[validate(length(min = 1, message = "Author name must not be empty"))]
    pub author_name: String,
}

/// Update book request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub genre: Option<String>,
    #[validate(length(min = 1, message = "Author name must not be empty"))]
    pub author_name: Option<String>,
}
