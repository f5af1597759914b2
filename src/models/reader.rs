//! Reader model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::address::{Address, CreateAddress};

/// Reader model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reader {
    pub id: i32,
    pub name: String,
    pub address_id: i32,
    pub last_visit: Option<NaiveDate>,
}

/// Reader with its address embedded for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReaderDetails {
    pub id: i32,
    pub name: String,
    pub last_visit: Option<NaiveDate>,
    pub address: Address,
}

impl ReaderDetails {
    pub fn from_parts(reader: Reader, address: Address) -> Self {
        Self {
            id: reader.id,
            name: reader.name,
            last_visit: reader.last_visit,
            address,
        }
    }
}

/// Create reader request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReader {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(nested)]
    pub address: CreateAddress,
}

/// Update reader request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReader {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(nested)]
    pub address: CreateAddress,
}
