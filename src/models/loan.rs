//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Loan model from database.
///
/// A loan with no return date is open; a book can have at most one open loan
/// at a time, and `return_date` is set exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub reader_id: i32,
    pub loan_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    /// An open loan has not been returned yet.
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    #[validate(range(min = 1, message = "book_id must be positive"))]
    pub book_id: i32,
    #[validate(range(min = 1, message = "reader_id must be positive"))]
    pub reader_id: i32,
}
