use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VacancyStatus {
    Active,
    Paused,
    Closed,
}

impl VacancyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacancyStatus::Active => "Active",
            VacancyStatus::Paused => "Paused",
            VacancyStatus::Closed => "Closed",
        }
    }
}

impl std::str::FromStr for VacancyStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "Active" => Ok(VacancyStatus::Active),
            "Paused" => Ok(VacancyStatus::Paused),
            "Closed" => Ok(VacancyStatus::Closed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
}

/// A published job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub category: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub status: VacancyStatus,
    pub open_positions: u32,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
}
