use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::Result;
use crate::listing::{paginate, VacancyFilter};
use crate::models::vacancy::Vacancy;
use crate::store::PortalStore;

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn PortalStore>,
}

impl VacancyService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: &VacancyFilter) -> Result<Vec<Vacancy>> {
        Ok(self.store.fetch_vacancies(filter).await?)
    }

    pub async fn list_page(
        &self,
        filter: &VacancyFilter,
        page_size: usize,
        page_number: usize,
    ) -> Result<Vec<Vacancy>> {
        let rows = self.store.fetch_vacancies(filter).await?;
        Ok(paginate(&rows, page_size, page_number))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Vacancy> {
        let vacancy = self.store.vacancy_by_slug(slug).await?;
        if let Err(e) = self.store.record_vacancy_view(vacancy.id).await {
            warn!(slug, error = %e, "failed to record vacancy view");
        }
        Ok(vacancy)
    }

    pub async fn create(&self, payload: CreateVacancyPayload) -> Result<Vacancy> {
        let vacancy = self.store.create_vacancy(payload.into_vacancy()?).await?;
        info!(vacancy = %vacancy.id, slug = %vacancy.slug, "vacancy published");
        Ok(vacancy)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateVacancyPayload) -> Result<Vacancy> {
        let existing = self.store.fetch_vacancy(id).await?;
        Ok(self.store.save_vacancy(payload.apply(existing)?).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete_vacancy(id).await?;
        info!(vacancy = %id, "vacancy deleted");
        Ok(())
    }
}
