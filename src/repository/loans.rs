//! Loans repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::loan::Loan,
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Create a loan. Checks and writes run in one transaction so a book
    /// cannot end up with two open loans.
    pub async fn create(
        &self,
        book_id: i32,
        reader_id: i32,
        loan_date: NaiveDate,
        expected_return_date: NaiveDate,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let is_available: Option<bool> =
            sqlx::query_scalar("SELECT is_available FROM books WHERE id = $1")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        let already_loaned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = $1 AND return_date IS NULL)",
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        // The availability flag must mirror "no open loan exists"; when the
        // two disagree the loans table wins.
        match is_available {
            Some(true) if !already_loaned => {}
            _ => {
                return Err(AppError::BusinessRule(format!(
                    "Book {} is not available",
                    book_id
                )));
            }
        }

        let reader_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM readers WHERE id = $1)")
                .bind(reader_id)
                .fetch_one(&mut *tx)
                .await?;
        if !reader_exists {
            return Err(AppError::NotFound(format!(
                "Reader with id {} not found",
                reader_id
            )));
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, reader_id, loan_date, expected_return_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(reader_id)
        .bind(loan_date)
        .bind(expected_return_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET is_available = FALSE WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(loan)
    }

    /// Return a loan. Setting the return date is terminal; a second return
    /// attempt fails.
    pub async fn return_loan(&self, loan_id: i32, return_date: NaiveDate) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        if loan.return_date.is_some() {
            return Err(AppError::BusinessRule("Loan already returned".to_string()));
        }

        let loan = sqlx::query_as::<_, Loan>(
            "UPDATE loans SET return_date = $1 WHERE id = $2 RETURNING *",
        )
        .bind(return_date)
        .bind(loan_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET is_available = TRUE WHERE id = $1")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(loan)
    }

    /// Check whether a book has an open loan
    pub async fn book_has_open_loan(&self, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = $1 AND return_date IS NULL)",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Check whether a reader has an open loan
    pub async fn reader_has_open_loan(&self, reader_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE reader_id = $1 AND return_date IS NULL)",
        )
        .bind(reader_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
