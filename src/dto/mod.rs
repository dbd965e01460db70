pub mod application_dto;
pub mod vacancy_dto;
