use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::listing::{ApplicationFilter, CandidateFilter, VacancyFilter};
use crate::models::application::{ApplicationStatus, ApplicationSummary};
use crate::models::vacancy::VacancyStatus;
use crate::store::PortalStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_vacancies: usize,
    pub new_applications: usize,
    pub in_review: usize,
    pub interviews: usize,
    pub total_candidates: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn PortalStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let vacancies = self
            .store
            .fetch_vacancies(&VacancyFilter {
                status: Some(VacancyStatus::Active),
                ..Default::default()
            })
            .await?;
        let applications = self
            .store
            .fetch_applications(&ApplicationFilter::default())
            .await?;
        let candidates = self
            .store
            .fetch_candidates(&CandidateFilter::default())
            .await?;

        let by_status = status_counts(&applications);
        Ok(DashboardStats {
            active_vacancies: vacancies.len(),
            new_applications: by_status
                .get(&ApplicationStatus::New)
                .copied()
                .unwrap_or(0),
            in_review: by_status
                .get(&ApplicationStatus::InReview)
                .copied()
                .unwrap_or(0),
            interviews: by_status
                .get(&ApplicationStatus::Interview)
                .copied()
                .unwrap_or(0),
            total_candidates: candidates.len(),
        })
    }

    pub async fn recent_applications(&self, limit: usize) -> Result<Vec<ApplicationSummary>> {
        let mut rows = self
            .store
            .fetch_applications(&ApplicationFilter::default())
            .await?;
        rows.truncate(limit);
        Ok(rows)
    }
}

fn status_counts(rows: &[ApplicationSummary]) -> HashMap<ApplicationStatus, usize> {
    let mut counts = HashMap::new();
    for row in rows {
        *counts.entry(row.status).or_insert(0) += 1;
    }
    counts
}
