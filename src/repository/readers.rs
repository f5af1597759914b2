//! Readers and addresses repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        address::Address,
        reader::{Reader, ReaderDetails},
    },
};

#[derive(Clone)]
pub struct ReadersRepository {
    pool: Pool<Postgres>,
}

impl ReadersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an address by (city, street), inserting the row when absent.
    /// Readers sharing an address reuse the same row.
    pub async fn get_or_create_address(&self, city: &str, street: &str) -> AppResult<Address> {
        let existing = sqlx::query_as::<_, Address>(
            "SELECT id, city, street FROM addresses WHERE city = $1 AND street = $2",
        )
        .bind(city)
        .bind(street)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(address) = existing {
            return Ok(address);
        }

        let address = sqlx::query_as::<_, Address>(
            "INSERT INTO addresses (city, street) VALUES ($1, $2) RETURNING id, city, street",
        )
        .bind(city)
        .bind(street)
        .fetch_one(&self.pool)
        .await?;
        Ok(address)
    }

    /// Create a reader together with a fresh address row, in one transaction
    pub async fn create(
        &self,
        name: &str,
        city: &str,
        street: &str,
        today: NaiveDate,
    ) -> AppResult<ReaderDetails> {
        let mut tx = self.pool.begin().await?;

        let address = sqlx::query_as::<_, Address>(
            "INSERT INTO addresses (city, street) VALUES ($1, $2) RETURNING id, city, street",
        )
        .bind(city)
        .bind(street)
        .fetch_one(&mut *tx)
        .await?;

        let reader = sqlx::query_as::<_, Reader>(
            r#"
            INSERT INTO readers (name, address_id, last_visit)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address.id)
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ReaderDetails::from_parts(reader, address))
    }

    /// Get reader with its address embedded. Lookups count as visits, so
    /// `last_visit` is refreshed in the same transaction.
    pub async fn get_details(&self, id: i32, today: NaiveDate) -> AppResult<ReaderDetails> {
        let mut tx = self.pool.begin().await?;

        let reader = sqlx::query_as::<_, Reader>(
            "UPDATE readers SET last_visit = $1 WHERE id = $2 RETURNING *",
        )
        .bind(today)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reader with id {} not found", id)))?;

        let address = sqlx::query_as::<_, Address>(
            "SELECT id, city, street FROM addresses WHERE id = $1",
        )
        .bind(reader.address_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ReaderDetails::from_parts(reader, address))
    }

    /// Check whether a reader exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM readers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Update a reader's name and address; refreshes `last_visit`
    pub async fn update(
        &self,
        id: i32,
        name: &str,
        address_id: i32,
        today: NaiveDate,
    ) -> AppResult<Reader> {
        sqlx::query_as::<_, Reader>(
            r#"
            UPDATE readers
            SET name = $1, address_id = $2, last_visit = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address_id)
        .bind(today)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reader with id {} not found", id)))
    }

    /// Delete a reader together with their (returned) loan history
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM loans WHERE reader_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM readers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Reader with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
