//! Loan lifecycle service

use chrono::{Duration, NaiveDate, Utc};

use crate::{
    config::LoansConfig,
    error::AppResult,
    models::loan::{CreateLoan, Loan},
    repository::Repository,
};

/// Compute the expected return date for a loan starting on `loan_date`
fn expected_return_date(loan_date: NaiveDate, period_weeks: i64) -> NaiveDate {
    loan_date + Duration::weeks(period_weeks)
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig) -> Self {
        Self { repository, config }
    }

    /// Borrow a book. The book must be available and the reader must exist;
    /// the book becomes unavailable until the loan is returned.
    pub async fn create_loan(&self, loan: CreateLoan) -> AppResult<Loan> {
        let loan_date = Utc::now().date_naive();
        let due = expected_return_date(loan_date, self.config.loan_period_weeks);

        self.repository
            .loans
            .create(loan.book_id, loan.reader_id, loan_date, due)
            .await
    }

    /// Return an open loan; the book becomes available again. A loan can
    /// only be returned once.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<Loan> {
        self.repository
            .loans
            .return_loan(loan_id, Utc::now().date_naive())
            .await
    }

    /// Get loan by ID
    pub async fn get_loan(&self, loan_id: i32) -> AppResult<Loan> {
        self.repository.loans.get_by_id(loan_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_date_is_two_weeks_out_by_default() {
        let config = LoansConfig::default();
        assert_eq!(
            expected_return_date(date(2024, 3, 1), config.loan_period_weeks),
            date(2024, 3, 15)
        );
    }

    #[test]
    fn due_date_crosses_month_and_year_boundaries() {
        assert_eq!(expected_return_date(date(2024, 12, 27), 1), date(2025, 1, 3));
        assert_eq!(expected_return_date(date(2024, 2, 26), 2), date(2024, 3, 11));
    }

    #[test]
    fn loan_is_open_until_return_date_is_set() {
        let mut loan = Loan {
            id: 1,
            book_id: 7,
            reader_id: 3,
            loan_date: date(2024, 5, 2),
            expected_return_date: date(2024, 5, 16),
            return_date: None,
        };
        assert!(loan.is_open());

        loan.return_date = Some(date(2024, 5, 10));
        assert!(!loan.is_open());
    }
}
