//! Business logic services

pub mod catalog;
pub mod loans;
pub mod readers;
pub mod reports;

use crate::{config::LoansConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub readers: readers::ReadersService,
    pub loans: loans::LoansService,
    pub reports: reports::ReportsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, loans_config: LoansConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            readers: readers::ReadersService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone(), loans_config),
            reports: reports::ReportsService::new(repository.clone()),
            repository,
        }
    }

    /// Verify database connectivity, used by the readiness probe
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
