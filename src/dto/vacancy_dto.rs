use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{validation_error, Result};
use crate::models::vacancy::{EmploymentType, Vacancy, VacancyStatus};
use crate::utils::text::{slugify, split_lines};

/// Admin form payload for publishing a vacancy. The multi-line fields
/// arrive as raw textarea text and are split into ordered lists; the slug
/// is derived from the title.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub employment_type: EmploymentType,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0))]
    pub salary_min: i64,
    #[validate(range(min = 0))]
    pub salary_max: i64,
    #[validate(length(min = 1))]
    pub description: String,
    /// Raw textarea text, one responsibility per line.
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub benefits: String,
    pub status: VacancyStatus,
    #[validate(range(min = 1))]
    pub open_positions: u32,
}

impl CreateVacancyPayload {
    pub fn into_vacancy(self) -> Result<Vacancy> {
        self.validate()?;
        if self.salary_min > self.salary_max {
            return Err(validation_error(
                "salary_min",
                "range",
                "minimum salary exceeds maximum salary",
            ));
        }
        Ok(Vacancy {
            id: Uuid::new_v4(),
            slug: slugify(&self.title),
            title: self.title,
            location: self.location,
            employment_type: self.employment_type,
            category: self.category,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            description: self.description,
            responsibilities: split_lines(&self.responsibilities),
            requirements: split_lines(&self.requirements),
            benefits: split_lines(&self.benefits),
            status: self.status,
            open_positions: self.open_positions,
            published_at: crate::utils::time::now(),
            views: 0,
        })
    }
}

/// Partial edit of an existing vacancy; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub category: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub description: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub status: Option<VacancyStatus>,
    pub open_positions: Option<u32>,
}

impl UpdateVacancyPayload {
    pub fn apply(self, mut vacancy: Vacancy) -> Result<Vacancy> {
        self.validate()?;
        if let Some(title) = self.title {
            vacancy.slug = slugify(&title);
            vacancy.title = title;
        }
        if let Some(location) = self.location {
            vacancy.location = location;
        }
        if let Some(employment_type) = self.employment_type {
            vacancy.employment_type = employment_type;
        }
        if let Some(category) = self.category {
            vacancy.category = category;
        }
        if let Some(salary_min) = self.salary_min {
            vacancy.salary_min = salary_min;
        }
        if let Some(salary_max) = self.salary_max {
            vacancy.salary_max = salary_max;
        }
        if let Some(description) = self.description {
            vacancy.description = description;
        }
        if let Some(responsibilities) = self.responsibilities {
            vacancy.responsibilities = split_lines(&responsibilities);
        }
        if let Some(requirements) = self.requirements {
            vacancy.requirements = split_lines(&requirements);
        }
        if let Some(benefits) = self.benefits {
            vacancy.benefits = split_lines(&benefits);
        }
        if let Some(status) = self.status {
            vacancy.status = status;
        }
        if let Some(open_positions) = self.open_positions {
            vacancy.open_positions = open_positions;
        }
        if vacancy.salary_min > vacancy.salary_max {
            return Err(validation_error(
                "salary_min",
                "range",
                "minimum salary exceeds maximum salary",
            ));
        }
        Ok(vacancy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateVacancyPayload {
        CreateVacancyPayload {
            title: "Maestro Panadero".to_string(),
            location: "Sucursal Centro".to_string(),
            employment_type: EmploymentType::FullTime,
            category: "Production".to_string(),
            salary_min: 15_000,
            salary_max: 20_000,
            description: "Artisan bread production.".to_string(),
            responsibilities: "Bake artisan bread\n\n  Supervise quality \n".to_string(),
            requirements: "3 years of experience".to_string(),
            benefits: String::new(),
            status: VacancyStatus::Active,
            open_positions: 2,
        }
    }

    #[test]
    fn form_assembly_splits_lines_and_derives_slug() {
        let vacancy = payload().into_vacancy().unwrap();
        assert_eq!(vacancy.slug, "maestro-panadero");
        assert_eq!(
            vacancy.responsibilities,
            vec!["Bake artisan bread", "Supervise quality"]
        );
        assert!(vacancy.benefits.is_empty());
        assert_eq!(vacancy.views, 0);
    }

    #[test]
    fn inverted_salary_range_is_rejected() {
        let mut bad = payload();
        bad.salary_min = 25_000;
        assert!(bad.into_vacancy().unwrap_err().is_validation());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut bad = payload();
        bad.title = String::new();
        assert!(bad.into_vacancy().unwrap_err().is_validation());
    }

    #[test]
    fn partial_update_keeps_untouched_fields() {
        let vacancy = payload().into_vacancy().unwrap();
        let updated = UpdateVacancyPayload {
            status: Some(VacancyStatus::Paused),
            ..Default::default()
        }
        .apply(vacancy.clone())
        .unwrap();
        assert_eq!(updated.status, VacancyStatus::Paused);
        assert_eq!(updated.title, vacancy.title);
        assert_eq!(updated.responsibilities, vacancy.responsibilities);
    }
}
