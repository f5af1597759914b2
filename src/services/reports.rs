//! Read-only aggregate reports over loans, books and readers

use sqlx::Row;

use crate::{
    api::reports::{
        AvailabilityReport, FavoriteGenreEntry, LastVisitEntry, OverdueEntry, ReaderLoanCount,
    },
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Number of loans ever taken, per reader
    pub async fn reader_history(&self) -> AppResult<Vec<ReaderLoanCount>> {
        let rows = sqlx::query(
            r#"
            SELECT r.name AS reader_name, COUNT(l.book_id) AS taken_books
            FROM loans l
            JOIN readers r ON r.id = l.reader_id
            GROUP BY r.id, r.name
            ORDER BY r.name
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ReaderLoanCount {
                reader: row.get("reader_name"),
                loans: row.get("taken_books"),
            })
            .collect())
    }

    /// Number of currently open loans, per reader
    pub async fn current_loans(&self) -> AppResult<Vec<ReaderLoanCount>> {
        let rows = sqlx::query(
            r#"
            SELECT r.name AS reader_name, COUNT(l.book_id) AS taken_books
            FROM loans l
            JOIN readers r ON r.id = l.reader_id
            WHERE l.return_date IS NULL
            GROUP BY r.id, r.name
            ORDER BY r.name
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ReaderLoanCount {
                reader: row.get("reader_name"),
                loans: row.get("taken_books"),
            })
            .collect())
    }

    /// Most recent loan or return date, per reader. An open loan counts from
    /// its loan date, a closed one from its return date.
    pub async fn last_visits(&self) -> AppResult<Vec<LastVisitEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT r.name AS reader_name,
                   MAX(CASE WHEN l.return_date IS NULL THEN l.loan_date
                            ELSE l.return_date END) AS last_visit_date
            FROM loans l
            JOIN readers r ON r.id = l.reader_id
            GROUP BY r.id, r.name
            ORDER BY r.name
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| LastVisitEntry {
                reader: row.get("reader_name"),
                last_visit: row.get("last_visit_date"),
            })
            .collect())
    }

    /// The genre each reader has borrowed most
    pub async fn favorite_genres(&self) -> AppResult<Vec<FavoriteGenreEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT reader_name, favorite_genre
            FROM (
                SELECT r.name AS reader_name,
                       b.genre AS favorite_genre,
                       ROW_NUMBER() OVER (
                           PARTITION BY r.id ORDER BY COUNT(l.book_id) DESC
                       ) AS rn
                FROM loans l
                JOIN readers r ON r.id = l.reader_id
                JOIN books b ON b.id = l.book_id
                GROUP BY r.id, r.name, b.genre
            ) ranked
            WHERE rn = 1
            ORDER BY reader_name
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FavoriteGenreEntry {
                reader: row.get("reader_name"),
                genre: row.get("favorite_genre"),
            })
            .collect())
    }

    /// Loans returned after their expected return date, with days overdue
    pub async fn overdue_returns(&self) -> AppResult<Vec<OverdueEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT b.title, r.name AS reader_name,
                   (l.return_date - l.expected_return_date) AS overdue_days
            FROM loans l
            JOIN readers r ON r.id = l.reader_id
            JOIN books b ON b.id = l.book_id
            WHERE l.return_date IS NOT NULL
              AND l.return_date > l.expected_return_date
            ORDER BY overdue_days DESC
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OverdueEntry {
                title: row.get("title"),
                reader: row.get("reader_name"),
                days_overdue: row.get("overdue_days"),
            })
            .collect())
    }

    /// Count of books with no open loan. Derived from the loans table rather
    /// than the availability flag, which is the redundant copy.
    pub async fn availability(&self) -> AppResult<AvailabilityReport> {
        let available_books: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM books b
            LEFT JOIN loans l ON b.id = l.book_id AND l.return_date IS NULL
            WHERE l.id IS NULL
            "#,
        )
        .fetch_one(&self.repository.pool)
        .await?;

        Ok(AvailabilityReport { available_books })
    }
}
