//! Contract to the hosted data backend. The mutators in `models` never call
//! this; the services wire mutator output into `save_application`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::listing::{ApplicationFilter, CandidateFilter, VacancyFilter};
use crate::models::application::{Application, ApplicationSummary};
use crate::models::candidate::Candidate;
use crate::models::vacancy::Vacancy;

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the portal persists. Writes are full-record, last-write-wins;
/// the backend owns referential integrity between the three entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalStore: Send + Sync {
    /// Joined listing rows, newest submission first. The filter may be
    /// interpreted server-side; implementations must honor it either way.
    async fn fetch_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> StoreResult<Vec<ApplicationSummary>>;
    async fn fetch_application(&self, id: Uuid) -> StoreResult<Application>;
    async fn create_application(&self, application: Application) -> StoreResult<Application>;
    async fn save_application(&self, application: Application) -> StoreResult<Application>;
    async fn delete_application(&self, id: Uuid) -> StoreResult<()>;

    /// Vacancies, newest publication first.
    async fn fetch_vacancies(&self, filter: &VacancyFilter) -> StoreResult<Vec<Vacancy>>;
    async fn fetch_vacancy(&self, id: Uuid) -> StoreResult<Vacancy>;
    async fn vacancy_by_slug(&self, slug: &str) -> StoreResult<Vacancy>;
    async fn create_vacancy(&self, vacancy: Vacancy) -> StoreResult<Vacancy>;
    async fn save_vacancy(&self, vacancy: Vacancy) -> StoreResult<Vacancy>;
    async fn delete_vacancy(&self, id: Uuid) -> StoreResult<()>;
    /// Bumps the public view counter. Callers treat failures as non-fatal.
    async fn record_vacancy_view(&self, id: Uuid) -> StoreResult<()>;

    /// Candidates, newest first.
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> StoreResult<Vec<Candidate>>;
    async fn fetch_candidate(&self, id: Uuid) -> StoreResult<Candidate>;
    async fn candidate_by_email(&self, email: &str) -> StoreResult<Option<Candidate>>;
    async fn create_candidate(&self, candidate: Candidate) -> StoreResult<Candidate>;
    async fn save_candidate(&self, candidate: Candidate) -> StoreResult<Candidate>;
}
