//! Address model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Address model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Address {
    pub id: i32,
    pub city: String,
    pub street: String,
}

/// Address payload carried inside reader create/update requests
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAddress {
    #[validate(length(min = 1, message = "City must not be empty"))]
    pub city: String,
    #[validate(length(min = 1, message = "Street must not be empty"))]
    pub street: String,
}
