//! Reader management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::reader::{CreateReader, ReaderDetails, UpdateReader},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReadersService {
    repository: Repository,
}

impl ReadersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new reader with a fresh address
    pub async fn create_reader(&self, reader: CreateReader) -> AppResult<ReaderDetails> {
        let today = Utc::now().date_naive();
        self.repository
            .readers
            .create(&reader.name, &reader.address.city, &reader.address.street, today)
            .await
    }

    /// Get a reader by ID; any lookup counts as a library visit
    pub async fn get_reader(&self, id: i32) -> AppResult<ReaderDetails> {
        let today = Utc::now().date_naive();
        self.repository.readers.get_details(id, today).await
    }

    /// Update a reader's name and address. The address is resolved by
    /// (city, street) so readers moving to a shared address reuse the row.
    pub async fn update_reader(&self, id: i32, update: UpdateReader) -> AppResult<ReaderDetails> {
        let address = self
            .repository
            .readers
            .get_or_create_address(&update.address.city, &update.address.street)
            .await?;

        let today = Utc::now().date_naive();
        let reader = self
            .repository
            .readers
            .update(id, &update.name, address.id, today)
            .await?;

        Ok(ReaderDetails::from_parts(reader, address))
    }

    /// Delete a reader unless they still hold an open loan
    pub async fn delete_reader(&self, id: i32) -> AppResult<()> {
        if !self.repository.readers.exists(id).await? {
            return Err(AppError::NotFound(format!("Reader with id {} not found", id)));
        }

        if self.repository.loans.reader_has_open_loan(id).await? {
            return Err(AppError::Conflict(
                "Reader still has books on loan and cannot be deleted".to_string(),
            ));
        }

        self.repository.readers.delete(id).await
    }
}
