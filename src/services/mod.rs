pub mod application_service;
pub mod candidate_service;
pub mod dashboard_service;
pub mod vacancy_service;
