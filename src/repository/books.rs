//! Books and authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetails, BookDetailsRow},
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find an author by exact name
    pub async fn find_author_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT id, name FROM authors WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    /// Get an author by name, inserting the row when absent
    pub async fn get_or_create_author(&self, name: &str) -> AppResult<Author> {
        if let Some(author) = self.find_author_by_name(name).await? {
            return Ok(author);
        }

        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    /// Create a new book; new books start available
    pub async fn create(&self, title: &str, genre: &str, author_id: i32) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, genre, author_id, is_available)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(genre)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get book with its author embedded
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        sqlx::query_as::<_, BookDetailsRow>(
            r#"
            SELECT b.id, b.title, b.genre, b.is_available,
                   a.id as author_id, a.name as author_name
            FROM books b
            JOIN authors a ON b.author_id = a.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BookDetails::from)
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Update book fields; absent fields keep their current value
    pub async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        genre: Option<&str>,
        author_id: Option<i32>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE($1, title),
                genre = COALESCE($2, genre),
                author_id = COALESCE($3, author_id)
            WHERE id = $4
            "#,
        )
        .bind(title)
        .bind(genre)
        .bind(author_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Delete a book together with its (returned) loan history
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM loans WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// List all books currently available for loan, with authors embedded
    pub async fn list_available(&self) -> AppResult<Vec<BookDetails>> {
        let rows = sqlx::query_as::<_, BookDetailsRow>(
            r#"
            SELECT b.id, b.title, b.genre, b.is_available,
                   a.id as author_id, a.name as author_name
            FROM books b
            JOIN authors a ON b.author_id = a.id
            WHERE b.is_available = TRUE
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookDetails::from).collect())
    }
}
