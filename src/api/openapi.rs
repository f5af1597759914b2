//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, readers, reports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.4.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::list_available_books,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Readers
        readers::create_reader,
        readers::get_reader,
        readers::update_reader,
        readers::delete_reader,
        // Loans
        loans::create_loan,
        loans::get_loan,
        loans::return_loan,
        // Reports
        reports::reader_history,
        reports::current_loans,
        reports::last_visits,
        reports::favorite_genres,
        reports::overdue_returns,
        reports::availability,
    ),
    components(
        schemas(
            // Books
            crate::models::author::Author,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Readers
            crate::models::address::Address,
            crate::models::address::CreateAddress,
            crate::models::reader::ReaderDetails,
            crate::models::reader::CreateReader,
            crate::models::reader::UpdateReader,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::CreateLoan,
            loans::ReturnResponse,
            // Reports
            reports::ReaderLoanCount,
            reports::LastVisitEntry,
            reports::FavoriteGenreEntry,
            reports::OverdueEntry,
            reports::AvailabilityReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "readers", description = "Reader management"),
        (name = "loans", description = "Loan lifecycle"),
        (name = "reports", description = "Aggregate reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
