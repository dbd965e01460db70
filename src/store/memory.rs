//! In-memory implementation of the portal store, used by tests and local
//! development. State lives in `HashMap`s behind `tokio::sync::RwLock`; it
//! is consistent within one process and lost on restart. Listing rows are
//! joined in process from the three maps.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PortalStore, StoreError, StoreResult};
use crate::listing::{ApplicationFilter, CandidateFilter, VacancyFilter};
use crate::models::application::{Application, ApplicationSummary};
use crate::models::candidate::Candidate;
use crate::models::vacancy::Vacancy;

#[derive(Default)]
pub struct MemoryStore {
    applications: RwLock<HashMap<Uuid, Application>>,
    vacancies: RwLock<HashMap<Uuid, Vacancy>>,
    candidates: RwLock<HashMap<Uuid, Candidate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn summarize(
        application: &Application,
        candidates: &HashMap<Uuid, Candidate>,
        vacancies: &HashMap<Uuid, Vacancy>,
    ) -> Option<ApplicationSummary> {
        let candidate = candidates.get(&application.candidate_ref)?;
        let vacancy = vacancies.get(&application.vacancy_ref)?;
        Some(ApplicationSummary {
            id: application.id,
            candidate_ref: application.candidate_ref,
            vacancy_ref: application.vacancy_ref,
            status: application.status,
            candidate_name: candidate.full_name(),
            candidate_email: candidate.email.clone(),
            candidate_phone: Some(candidate.phone.clone()),
            city: candidate.city_or(&vacancy.location).to_string(),
            experience: candidate.experience.clone(),
            vacancy_title: vacancy.title.clone(),
            vacancy_slug: vacancy.slug.clone(),
            resume_ref: application.resume_ref.clone(),
            submitted_at: application.submitted_at,
        })
    }
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn fetch_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> StoreResult<Vec<ApplicationSummary>> {
        let applications = self.applications.read().await;
        let candidates = self.candidates.read().await;
        let vacancies = self.vacancies.read().await;

        let mut rows: Vec<ApplicationSummary> = applications
            .values()
            .filter_map(|a| Self::summarize(a, &candidates, &vacancies))
            .collect();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(filter.apply(&rows))
    }

    async fn fetch_application(&self, id: Uuid) -> StoreResult<Application> {
        self.applications
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("application {}", id)))
    }

    async fn create_application(&self, application: Application) -> StoreResult<Application> {
        let mut applications = self.applications.write().await;
        if applications.contains_key(&application.id) {
            return Err(StoreError::Conflict(format!(
                "application {} already exists",
                application.id
            )));
        }
        applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn save_application(&self, application: Application) -> StoreResult<Application> {
        let mut applications = self.applications.write().await;
        if !applications.contains_key(&application.id) {
            return Err(StoreError::NotFound(format!(
                "application {}",
                application.id
            )));
        }
        applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn delete_application(&self, id: Uuid) -> StoreResult<()> {
        self.applications
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("application {}", id)))
    }

    async fn fetch_vacancies(&self, filter: &VacancyFilter) -> StoreResult<Vec<Vacancy>> {
        let vacancies = self.vacancies.read().await;
        let mut rows: Vec<Vacancy> = vacancies.values().cloned().collect();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(filter.apply(&rows))
    }

    async fn fetch_vacancy(&self, id: Uuid) -> StoreResult<Vacancy> {
        self.vacancies
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("vacancy {}", id)))
    }

    async fn vacancy_by_slug(&self, slug: &str) -> StoreResult<Vacancy> {
        self.vacancies
            .read()
            .await
            .values()
            .find(|v| v.slug == slug)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("vacancy '{}'", slug)))
    }

    async fn create_vacancy(&self, vacancy: Vacancy) -> StoreResult<Vacancy> {
        let mut vacancies = self.vacancies.write().await;
        if vacancies.values().any(|v| v.slug == vacancy.slug) {
            return Err(StoreError::Conflict(format!(
                "vacancy slug '{}' already exists",
                vacancy.slug
            )));
        }
        vacancies.insert(vacancy.id, vacancy.clone());
        Ok(vacancy)
    }

    async fn save_vacancy(&self, vacancy: Vacancy) -> StoreResult<Vacancy> {
        let mut vacancies = self.vacancies.write().await;
        if !vacancies.contains_key(&vacancy.id) {
            return Err(StoreError::NotFound(format!("vacancy {}", vacancy.id)));
        }
        vacancies.insert(vacancy.id, vacancy.clone());
        Ok(vacancy)
    }

    async fn delete_vacancy(&self, id: Uuid) -> StoreResult<()> {
        self.vacancies
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("vacancy {}", id)))
    }

    async fn record_vacancy_view(&self, id: Uuid) -> StoreResult<()> {
        let mut vacancies = self.vacancies.write().await;
        let vacancy = vacancies
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("vacancy {}", id)))?;
        vacancy.views += 1;
        Ok(())
    }

    async fn fetch_candidates(&self, filter: &CandidateFilter) -> StoreResult<Vec<Candidate>> {
        let candidates = self.candidates.read().await;
        let mut rows: Vec<Candidate> = candidates.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(filter.apply(&rows))
    }

    async fn fetch_candidate(&self, id: Uuid) -> StoreResult<Candidate> {
        self.candidates
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("candidate {}", id)))
    }

    async fn candidate_by_email(&self, email: &str) -> StoreResult<Option<Candidate>> {
        Ok(self
            .candidates
            .read()
            .await
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_candidate(&self, candidate: Candidate) -> StoreResult<Candidate> {
        let mut candidates = self.candidates.write().await;
        if candidates
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(&candidate.email))
        {
            return Err(StoreError::Conflict(format!(
                "candidate with email '{}' already exists",
                candidate.email
            )));
        }
        candidates.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    async fn save_candidate(&self, candidate: Candidate) -> StoreResult<Candidate> {
        let mut candidates = self.candidates.write().await;
        if !candidates.contains_key(&candidate.id) {
            return Err(StoreError::NotFound(format!("candidate {}", candidate.id)));
        }
        candidates.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacancy::{EmploymentType, VacancyStatus};

    fn vacancy(slug: &str, location: &str) -> Vacancy {
        Vacancy {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: "Branch Cashier".to_string(),
            location: location.to_string(),
            employment_type: EmploymentType::FullTime,
            category: "Sales".to_string(),
            salary_min: 10_000,
            salary_max: 12_000,
            description: "Customer service and cash handling.".to_string(),
            responsibilities: vec![],
            requirements: vec![],
            benefits: vec![],
            status: VacancyStatus::Active,
            open_positions: 2,
            published_at: crate::utils::time::now(),
            views: 0,
        }
    }

    fn candidate(email: &str, city: Option<&str>) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            name: "Maria".to_string(),
            last_name: Some("Lopez".to_string()),
            email: email.to_string(),
            phone: "5523456789".to_string(),
            city: city.map(String::from),
            experience: "1-3 years".to_string(),
            skills: vec![],
            status: crate::models::candidate::CandidateStatus::Active,
            resume_ref: None,
            created_at: crate::utils::time::now(),
        }
    }

    #[tokio::test]
    async fn summaries_join_candidate_and_vacancy_fields() {
        let store = MemoryStore::new();
        let v = store
            .create_vacancy(vacancy("branch-cashier", "Puebla"))
            .await
            .unwrap();
        let c = store
            .create_candidate(candidate("maria@example.com", None))
            .await
            .unwrap();
        store
            .create_application(Application::new(c.id, v.id, None))
            .await
            .unwrap();

        let rows = store
            .fetch_applications(&ApplicationFilter::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].candidate_name, "Maria Lopez");
        assert_eq!(rows[0].vacancy_title, "Branch Cashier");
        // no candidate city, so the vacancy location fills in
        assert_eq!(rows[0].city, "Puebla");
    }

    #[tokio::test]
    async fn missing_application_is_not_found() {
        let store = MemoryStore::new();
        let err = store.fetch_application(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store
            .create_candidate(candidate("maria@example.com", None))
            .await
            .unwrap();
        let err = store
            .create_candidate(candidate("MARIA@example.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn view_counter_increments() {
        let store = MemoryStore::new();
        let v = store
            .create_vacancy(vacancy("branch-cashier", "Puebla"))
            .await
            .unwrap();
        store.record_vacancy_view(v.id).await.unwrap();
        store.record_vacancy_view(v.id).await.unwrap();
        let fetched = store.vacancy_by_slug("branch-cashier").await.unwrap();
        assert_eq!(fetched.views, 2);
    }
}
