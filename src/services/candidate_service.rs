use std::sync::Arc;

use uuid::Uuid;

use crate::error::Result;
use crate::listing::{paginate, CandidateFilter};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::store::PortalStore;

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn PortalStore>,
}

impl CandidateService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>> {
        Ok(self.store.fetch_candidates(filter).await?)
    }

    pub async fn list_page(
        &self,
        filter: &CandidateFilter,
        page_size: usize,
        page_number: usize,
    ) -> Result<Vec<Candidate>> {
        let rows = self.store.fetch_candidates(filter).await?;
        Ok(paginate(&rows, page_size, page_number))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        Ok(self.store.candidate_by_email(email).await?)
    }

    pub async fn find_or_create(&self, candidate: Candidate) -> Result<Candidate> {
        if let Some(existing) = self.store.candidate_by_email(&candidate.email).await? {
            return Ok(existing);
        }
        Ok(self.store.create_candidate(candidate).await?)
    }

    pub async fn change_status(&self, id: Uuid, status: CandidateStatus) -> Result<Candidate> {
        let mut candidate = self.store.fetch_candidate(id).await?;
        candidate.status = status;
        Ok(self.store.save_candidate(candidate).await?)
    }
}
