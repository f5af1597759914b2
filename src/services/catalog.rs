//! Catalog management service (books and authors)

use crate::{
    error::{AppError, AppResult},
    models::book::{BookDetails, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book, resolving its author by name (created when absent)
    pub async fn create_book(&self, book: CreateBook) -> AppResult<BookDetails> {
        let author = self
            .repository
            .books
            .get_or_create_author(&book.author_name)
            .await?;

        let created = self
            .repository
            .books
            .create(&book.title, &book.genre, author.id)
            .await?;

        Ok(BookDetails {
            id: created.id,
            title: created.title,
            genre: created.genre,
            author,
            is_available: created.is_available,
        })
    }

    /// Get book by ID with its author embedded
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    /// Partially update a book; a new author name is resolved the same way
    /// as on create
    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<BookDetails> {
        // Surface a 404 before touching authors
        self.repository.books.get_by_id(id).await?;

        let author_id = match update.author_name {
            Some(ref name) => Some(self.repository.books.get_or_create_author(name).await?.id),
            None => None,
        };

        self.repository
            .books
            .update(id, update.title.as_deref(), update.genre.as_deref(), author_id)
            .await?;

        self.repository.books.get_details(id).await
    }

    /// Delete a book unless it is still on loan
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(id).await?;

        if self.repository.loans.book_has_open_loan(id).await? {
            return Err(AppError::Conflict(
                "Book is still on loan and cannot be deleted".to_string(),
            ));
        }

        self.repository.books.delete(id).await
    }

    /// List all books currently available for loan
    pub async fn list_available_books(&self) -> AppResult<Vec<BookDetails>> {
        self.repository.books.list_available().await
    }
}
