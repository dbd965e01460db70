//! Pure listing helpers for the admin views: named filters composed with
//! AND semantics over an in-memory collection, plus page slicing. Nothing
//! here touches the store; the store may also interpret the same filter
//! structs server-side.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::application::{ApplicationStatus, ApplicationSummary};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::vacancy::{Vacancy, VacancyStatus};

/// Sentinel filter values meaning "no restriction" on a dimension.
const ALL_SENTINELS: [&str; 2] = ["all", "All"];

fn is_all(value: &str) -> bool {
    value.is_empty() || ALL_SENTINELS.contains(&value)
}

fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Filter configuration for the applications list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub vacancy: Option<Uuid>,
    pub experience: Option<String>,
    pub city: Option<String>,
    /// Case-insensitive substring match against candidate name, email and
    /// vacancy title.
    pub query: Option<String>,
}

impl ApplicationFilter {
    /// Builds a filter from loose key/value pairs, e.g. query-string params.
    /// Unrecognized keys and unparseable values are dropped, not fatal; the
    /// `all` sentinel (or an empty value) leaves a dimension unrestricted.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = ApplicationFilter::default();
        for (key, value) in params {
            if is_all(value) {
                continue;
            }
            match key {
                "status" => match ApplicationStatus::from_str(value) {
                    Ok(status) => filter.status = Some(status),
                    Err(_) => debug!(value, "ignoring unparseable status filter"),
                },
                "vacancy" => match Uuid::parse_str(value) {
                    Ok(id) => filter.vacancy = Some(id),
                    Err(_) => debug!(value, "ignoring unparseable vacancy filter"),
                },
                "experience" => filter.experience = Some(value.to_string()),
                "city" => filter.city = Some(value.to_string()),
                "q" => filter.query = Some(value.to_string()),
                other => debug!(key = other, "ignoring unrecognized filter key"),
            }
        }
        filter
    }

    /// All configured dimensions must accept the record.
    pub fn matches(&self, row: &ApplicationSummary) -> bool {
        if let Some(status) = self.status {
            if row.status != status {
                return false;
            }
        }
        if let Some(vacancy) = self.vacancy {
            if row.vacancy_ref != vacancy {
                return false;
            }
        }
        if let Some(experience) = &self.experience {
            if &row.experience != experience {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if &row.city != city {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let q = query.to_lowercase();
            if !contains_fold(&row.candidate_name, &q)
                && !contains_fold(&row.candidate_email, &q)
                && !contains_fold(&row.vacancy_title, &q)
            {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, rows: &[ApplicationSummary]) -> Vec<ApplicationSummary> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Filter configuration for the vacancies list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VacancyFilter {
    pub status: Option<VacancyStatus>,
    pub category: Option<String>,
    /// Matched against title and description.
    pub query: Option<String>,
}

impl VacancyFilter {
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = VacancyFilter::default();
        for (key, value) in params {
            if is_all(value) {
                continue;
            }
            match key {
                "status" => match VacancyStatus::from_str(value) {
                    Ok(status) => filter.status = Some(status),
                    Err(_) => debug!(value, "ignoring unparseable status filter"),
                },
                "category" => filter.category = Some(value.to_string()),
                "q" => filter.query = Some(value.to_string()),
                other => debug!(key = other, "ignoring unrecognized filter key"),
            }
        }
        filter
    }

    pub fn matches(&self, vacancy: &Vacancy) -> bool {
        if let Some(status) = self.status {
            if vacancy.status != status {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &vacancy.category != category {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let q = query.to_lowercase();
            if !contains_fold(&vacancy.title, &q) && !contains_fold(&vacancy.description, &q) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, rows: &[Vacancy]) -> Vec<Vacancy> {
        rows.iter().filter(|v| self.matches(v)).cloned().collect()
    }
}

/// Filter configuration for the candidates list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilter {
    pub status: Option<CandidateStatus>,
    pub experience: Option<String>,
    pub city: Option<String>,
    /// Matched against name, last name and email.
    pub query: Option<String>,
}

impl CandidateFilter {
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = CandidateFilter::default();
        for (key, value) in params {
            if is_all(value) {
                continue;
            }
            match key {
                "status" => match CandidateStatus::from_str(value) {
                    Ok(status) => filter.status = Some(status),
                    Err(_) => debug!(value, "ignoring unparseable status filter"),
                },
                "experience" => filter.experience = Some(value.to_string()),
                "city" => filter.city = Some(value.to_string()),
                "q" => filter.query = Some(value.to_string()),
                other => debug!(key = other, "ignoring unrecognized filter key"),
            }
        }
        filter
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        if let Some(status) = self.status {
            if candidate.status != status {
                return false;
            }
        }
        if let Some(experience) = &self.experience {
            if &candidate.experience != experience {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if candidate.city.as_deref() != Some(city.as_str()) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let q = query.to_lowercase();
            let last = candidate.last_name.as_deref().unwrap_or("");
            if !contains_fold(&candidate.name, &q)
                && !contains_fold(last, &q)
                && !contains_fold(&candidate.email, &q)
            {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, rows: &[Candidate]) -> Vec<Candidate> {
        rows.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

/// Slices one page out of an already-filtered collection. Pages are
/// 1-indexed; a page past the end is an empty vector, not an error. Page 0
/// is clamped to page 1.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_number: usize) -> Vec<T> {
    if page_size == 0 {
        return Vec::new();
    }
    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(items.len());
    items[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(status: ApplicationStatus, city: &str, name: &str) -> ApplicationSummary {
        ApplicationSummary {
            id: Uuid::new_v4(),
            candidate_ref: Uuid::new_v4(),
            vacancy_ref: Uuid::new_v4(),
            status,
            candidate_name: name.to_string(),
            candidate_email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            candidate_phone: None,
            city: city.to_string(),
            experience: "1-3 years".to_string(),
            vacancy_title: "Master Baker".to_string(),
            vacancy_slug: "master-baker".to_string(),
            resume_ref: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn dimensions_compose_with_and_semantics() {
        let rows = vec![
            row(ApplicationStatus::New, "Monterrey", "Maria Lopez"),
            row(ApplicationStatus::New, "CDMX", "Juan Perez"),
            row(ApplicationStatus::Interview, "Monterrey", "Carlos Ramirez"),
        ];
        let filter = ApplicationFilter {
            status: Some(ApplicationStatus::New),
            city: Some("Monterrey".to_string()),
            ..Default::default()
        };
        let hits = filter.apply(&rows);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].candidate_name, "Maria Lopez");
    }

    #[test]
    fn free_text_query_is_case_insensitive_across_fields() {
        let rows = vec![
            row(ApplicationStatus::New, "CDMX", "Maria Lopez"),
            row(ApplicationStatus::New, "CDMX", "Juan Perez"),
        ];
        let by_name = ApplicationFilter {
            query: Some("MARIA".to_string()),
            ..Default::default()
        };
        assert_eq!(by_name.apply(&rows).len(), 1);

        let by_email = ApplicationFilter {
            query: Some("juan.perez@".to_string()),
            ..Default::default()
        };
        assert_eq!(by_email.apply(&rows).len(), 1);

        // Vacancy title matches every row here.
        let by_title = ApplicationFilter {
            query: Some("baker".to_string()),
            ..Default::default()
        };
        assert_eq!(by_title.apply(&rows).len(), 2);
    }

    #[test]
    fn filtering_preserves_input_order() {
        let rows: Vec<ApplicationSummary> = (0..6)
            .map(|i| row(ApplicationStatus::New, "CDMX", &format!("cand{}", i)))
            .collect();
        let filter = ApplicationFilter {
            status: Some(ApplicationStatus::New),
            ..Default::default()
        };
        let names: Vec<String> = filter
            .apply(&rows)
            .into_iter()
            .map(|r| r.candidate_name)
            .collect();
        assert_eq!(
            names,
            vec!["cand0", "cand1", "cand2", "cand3", "cand4", "cand5"]
        );
    }

    #[test]
    fn from_params_ignores_unknown_keys_and_bad_values() {
        let filter = ApplicationFilter::from_params([
            ("status", "New"),
            ("sort", "salary"),
            ("vacancy", "not-a-uuid"),
            ("city", "all"),
            ("q", "lopez"),
        ]);
        assert_eq!(
            filter,
            ApplicationFilter {
                status: Some(ApplicationStatus::New),
                query: Some("lopez".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn from_params_bad_status_leaves_dimension_open() {
        let filter = ApplicationFilter::from_params([("status", "Archived")]);
        assert_eq!(filter, ApplicationFilter::default());
    }

    #[test]
    fn pagination_slices_and_overflows_to_empty() {
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(paginate(&items, 10, 1).len(), 10);
        assert_eq!(paginate(&items, 10, 2), vec![10, 11]);
        assert!(paginate(&items, 10, 3).is_empty());
        // page 0 is clamped to the first page
        assert_eq!(paginate(&items, 10, 0).len(), 10);
        assert!(paginate(&items, 0, 1).is_empty());
    }
}
