//! Read-only report endpoints

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Loan count for one reader
#[derive(Debug, Serialize, ToSchema)]
pub struct ReaderLoanCount {
    pub reader: String,
    pub loans: i64,
}

/// Last recorded visit for one reader
#[derive(Debug, Serialize, ToSchema)]
pub struct LastVisitEntry {
    pub reader: String,
    pub last_visit: NaiveDate,
}

/// Most borrowed genre for one reader
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteGenreEntry {
    pub reader: String,
    pub genre: String,
}

/// A loan returned past its expected return date
#[derive(Debug, Serialize, ToSchema)]
pub struct OverdueEntry {
    pub title: String,
    pub reader: String,
    pub days_overdue: i32,
}

/// Current availability summary
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityReport {
    pub available_books: i64,
}

/// Number of loans ever taken, per reader
#[utoipa::path(
    get,
    path = "/reports/reader-history",
    tag = "reports",
    responses(
        (status = 200, description = "Loan totals per reader", body = Vec<ReaderLoanCount>)
    )
)]
pub async fn reader_history(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReaderLoanCount>>> {
    let report = state.services.reports.reader_history().await?;
    Ok(Json(report))
}

/// Number of currently open loans, per reader
#[utoipa::path(
    get,
    path = "/reports/current-loans",
    tag = "reports",
    responses(
        (status = 200, description = "Open loan counts per reader", body = Vec<ReaderLoanCount>)
    )
)]
pub async fn current_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReaderLoanCount>>> {
    let report = state.services.reports.current_loans().await?;
    Ok(Json(report))
}

/// Most recent loan or return date, per reader
#[utoipa::path(
    get,
    path = "/reports/last-visits",
    tag = "reports",
    responses(
        (status = 200, description = "Last visit dates per reader", body = Vec<LastVisitEntry>)
    )
)]
pub async fn last_visits(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LastVisitEntry>>> {
    let report = state.services.reports.last_visits().await?;
    Ok(Json(report))
}

/// The genre each reader has borrowed most
#[utoipa::path(
    get,
    path = "/reports/favorite-genres",
    tag = "reports",
    responses(
        (status = 200, description = "Favorite genre per reader", body = Vec<FavoriteGenreEntry>)
    )
)]
pub async fn favorite_genres(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<FavoriteGenreEntry>>> {
    let report = state.services.reports.favorite_genres().await?;
    Ok(Json(report))
}

/// Loans returned after their expected return date
#[utoipa::path(
    get,
    path = "/reports/overdue",
    tag = "reports",
    responses(
        (status = 200, description = "Overdue returns", body = Vec<OverdueEntry>)
    )
)]
pub async fn overdue_returns(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<OverdueEntry>>> {
    let report = state.services.reports.overdue_returns().await?;
    Ok(Json(report))
}

/// Count of books currently available for loan
#[utoipa::path(
    get,
    path = "/reports/availability",
    tag = "reports",
    responses(
        (status = 200, description = "Availability summary", body = AvailabilityReport)
    )
)]
pub async fn availability(
    State(state): State<crate::AppState>,
) -> AppResult<Json<AvailabilityReport>> {
    let report = state.services.reports.availability().await?;
    Ok(Json(report))
}
