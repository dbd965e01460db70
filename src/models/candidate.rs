use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    Active,
    Hired,
    Discarded,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Active => "Active",
            CandidateStatus::Hired => "Hired",
            CandidateStatus::Discarded => "Discarded",
        }
    }
}

impl std::str::FromStr for CandidateStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "Active" => Ok(CandidateStatus::Active),
            "Hired" => Ok(CandidateStatus::Hired),
            "Discarded" => Ok(CandidateStatus::Discarded),
            _ => Err(()),
        }
    }
}

/// A person who has submitted at least one application. One record per
/// email address; repeat submissions reuse it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: String,
    /// Optional; listings fall back to the vacancy location when absent.
    pub city: Option<String>,
    /// Experience band as shown in the submit form ("1-3 years", ...).
    pub experience: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub status: CandidateStatus,
    pub resume_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.name, last),
            None => self.name.clone(),
        }
    }

    /// City used for display and filtering: the candidate's own city, or the
    /// vacancy location as the defined fallback.
    pub fn city_or<'a>(&'a self, vacancy_location: &'a str) -> &'a str {
        self.city.as_deref().unwrap_or(vacancy_location)
    }
}
