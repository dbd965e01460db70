use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::application_dto::{AddNotePayload, SubmitApplicationPayload};
use crate::error::Result;
use crate::listing::{paginate, ApplicationFilter};
use crate::models::application::{Application, ApplicationStatus, ApplicationSummary};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::store::PortalStore;
use crate::utils::text::split_lines;

// Every mutation is a full read-modify-write: fetch the record, apply the
// pure mutator, save the whole record back. Last write wins at the store.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn PortalStore>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, payload: SubmitApplicationPayload) -> Result<Application> {
        payload.validate()?;
        let vacancy = self.store.vacancy_by_slug(&payload.vacancy_slug).await?;

        let candidate = match self.store.candidate_by_email(&payload.email).await? {
            Some(existing) => existing,
            None => {
                self.store
                    .create_candidate(Candidate {
                        id: Uuid::new_v4(),
                        name: payload.name,
                        last_name: payload.last_name,
                        email: payload.email,
                        phone: payload.phone,
                        city: payload.city,
                        experience: payload.experience,
                        skills: split_lines(&payload.skills),
                        status: CandidateStatus::Active,
                        resume_ref: payload.resume_url.clone(),
                        created_at: crate::utils::time::now(),
                    })
                    .await?
            }
        };

        let application = self
            .store
            .create_application(Application::new(
                candidate.id,
                vacancy.id,
                payload.resume_url,
            ))
            .await?;
        info!(application = %application.id, vacancy = %vacancy.slug, "application submitted");
        Ok(application)
    }

    pub async fn get(&self, id: Uuid) -> Result<Application> {
        Ok(self.store.fetch_application(id).await?)
    }

    pub async fn list(&self, filter: &ApplicationFilter) -> Result<Vec<ApplicationSummary>> {
        Ok(self.store.fetch_applications(filter).await?)
    }

    pub async fn list_page(
        &self,
        filter: &ApplicationFilter,
        page_size: usize,
        page_number: usize,
    ) -> Result<Vec<ApplicationSummary>> {
        let rows = self.store.fetch_applications(filter).await?;
        Ok(paginate(&rows, page_size, page_number))
    }

    pub async fn change_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application> {
        let current = self.store.fetch_application(id).await?;
        let updated = self.store.save_application(current.with_status(status)).await?;
        info!(application = %id, status = %status, "application status changed");
        Ok(updated)
    }

    pub async fn add_note(&self, id: Uuid, payload: AddNotePayload) -> Result<Application> {
        payload.validate()?;
        let current = self.store.fetch_application(id).await?;
        let updated = current.with_note(&payload.text, &payload.author)?;
        Ok(self.store.save_application(updated).await?)
    }

    // removing an unknown note still succeeds; the write is the filtered
    // list either way
    pub async fn remove_note(&self, id: Uuid, note_id: Uuid) -> Result<Application> {
        let current = self.store.fetch_application(id).await?;
        Ok(self.store.save_application(current.without_note(note_id)).await?)
    }

    pub async fn add_tag(&self, id: Uuid, tag: &str) -> Result<Application> {
        let current = self.store.fetch_application(id).await?;
        Ok(self.store.save_application(current.with_tag(tag)).await?)
    }

    pub async fn remove_tag(&self, id: Uuid, tag: &str) -> Result<Application> {
        let current = self.store.fetch_application(id).await?;
        Ok(self.store.save_application(current.without_tag(tag)).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete_application(id).await?;
        info!(application = %id, "application deleted");
        Ok(())
    }
}
