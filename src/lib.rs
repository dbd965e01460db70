pub mod config;
pub mod dto;
pub mod error;
pub mod listing;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    application_service::ApplicationService, candidate_service::CandidateService,
    dashboard_service::DashboardService, vacancy_service::VacancyService,
};
use crate::store::PortalStore;

/// The wired-up portal core: every service sharing one store. UI layers
/// hold one of these and call into the services from their event handlers.
#[derive(Clone)]
pub struct Portal {
    pub applications: ApplicationService,
    pub vacancies: VacancyService,
    pub candidates: CandidateService,
    pub dashboard: DashboardService,
}

impl Portal {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self {
            applications: ApplicationService::new(store.clone()),
            vacancies: VacancyService::new(store.clone()),
            candidates: CandidateService::new(store.clone()),
            dashboard: DashboardService::new(store),
        }
    }
}
