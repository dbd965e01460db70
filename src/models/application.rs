use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{validation_error, Result};

/// Lifecycle marker for an application. Every status may follow every other;
/// transitions are explicit administrative actions, never automatic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    New,
    InReview,
    Interview,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::New,
        ApplicationStatus::InReview,
        ApplicationStatus::Interview,
        ApplicationStatus::Rejected,
        ApplicationStatus::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::New => "New",
            ApplicationStatus::InReview => "InReview",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "New" => Ok(ApplicationStatus::New),
            "InReview" => Ok(ApplicationStatus::InReview),
            "Interview" => Ok(ApplicationStatus::Interview),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            "Hired" => Ok(ApplicationStatus::Hired),
            other => Err(validation_error(
                "status",
                "enumeration",
                &format!("'{}' is not a known application status", other),
            )),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamped free-text annotation left by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A candidate's submission against a specific vacancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub candidate_ref: Uuid,
    pub vacancy_ref: Uuid,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub resume_ref: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl Application {
    pub fn new(candidate_ref: Uuid, vacancy_ref: Uuid, resume_ref: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            candidate_ref,
            vacancy_ref,
            status: ApplicationStatus::New,
            notes: Vec::new(),
            tags: Vec::new(),
            resume_ref,
            submitted_at: crate::utils::time::now(),
        }
    }

    /// Returns a copy with `status` replaced. Any status may follow any
    /// other, including itself; persistence stays with the caller.
    pub fn with_status(&self, status: ApplicationStatus) -> Application {
        Application {
            status,
            ..self.clone()
        }
    }

    /// Returns a copy with a fresh note appended. Rejects text that is empty
    /// after trimming; existing notes keep their order.
    pub fn with_note(&self, text: &str, author: &str) -> Result<Application> {
        let text = text.trim();
        if text.is_empty() {
            return Err(validation_error(
                "text",
                "length",
                "note text must not be empty",
            ));
        }
        let mut next = self.clone();
        next.notes.push(Note {
            id: Uuid::new_v4(),
            text: text.to_string(),
            author: author.to_string(),
            created_at: crate::utils::time::now(),
        });
        Ok(next)
    }

    /// Returns a copy without the note matching `note_id`. Unknown ids are a
    /// silent no-op; the remaining notes keep their relative order.
    pub fn without_note(&self, note_id: Uuid) -> Application {
        let mut next = self.clone();
        next.notes.retain(|n| n.id != note_id);
        next
    }

    /// Returns a copy with `tag` inserted, unless already present.
    pub fn with_tag(&self, tag: &str) -> Application {
        let mut next = self.clone();
        if !next.tags.iter().any(|t| t == tag) {
            next.tags.push(tag.to_string());
        }
        next
    }

    /// Returns a copy without `tag`; a no-op when absent.
    pub fn without_tag(&self, tag: &str) -> Application {
        let mut next = self.clone();
        next.tags.retain(|t| t != tag);
        next
    }
}

/// Joined listing row: an application plus the candidate and vacancy fields
/// the admin list filters and displays. Mirrors the backend's denormalized
/// applications view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub candidate_ref: Uuid,
    pub vacancy_ref: Uuid,
    pub status: ApplicationStatus,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
    /// Candidate city, falling back to the vacancy location when the
    /// candidate record carries none.
    pub city: String,
    pub experience: String,
    pub vacancy_title: String,
    pub vacancy_slug: String,
    pub resume_ref: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Application {
        Application::new(Uuid::new_v4(), Uuid::new_v4(), None)
    }

    #[test]
    fn new_application_starts_as_new_with_empty_annotations() {
        let app = sample();
        assert_eq!(app.status, ApplicationStatus::New);
        assert!(app.notes.is_empty());
        assert!(app.tags.is_empty());
    }

    #[test]
    fn every_status_pair_is_a_legal_transition() {
        let app = sample();
        for from in ApplicationStatus::ALL {
            let staged = app.with_status(from);
            for to in ApplicationStatus::ALL {
                let moved = staged.with_status(to);
                assert_eq!(moved.status, to);
                // everything else is untouched
                assert_eq!(moved.id, app.id);
                assert_eq!(moved.submitted_at, app.submitted_at);
            }
        }
    }

    #[test]
    fn blank_note_text_is_rejected() {
        let app = sample();
        assert!(app.with_note("", "Admin").unwrap_err().is_validation());
        assert!(app.with_note("   ", "Admin").unwrap_err().is_validation());

        let noted = app.with_note("Good candidate", "Admin").unwrap();
        assert_eq!(noted.notes.len(), app.notes.len() + 1);
        assert_eq!(noted.notes[0].text, "Good candidate");
        assert_eq!(noted.notes[0].author, "Admin");
    }

    #[test]
    fn removing_a_middle_note_preserves_order() {
        let app = sample()
            .with_note("first", "a")
            .unwrap()
            .with_note("second", "b")
            .unwrap()
            .with_note("third", "c")
            .unwrap();
        let middle = app.notes[1].id;

        let pruned = app.without_note(middle);
        let texts: Vec<&str> = pruned.notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "third"]);
    }

    #[test]
    fn removing_an_unknown_note_is_a_no_op() {
        let app = sample().with_note("only", "a").unwrap();
        let pruned = app.without_note(Uuid::new_v4());
        assert_eq!(pruned, app);
    }

    #[test]
    fn tags_have_set_semantics() {
        let app = sample();
        let once = app.with_tag("Urgent");
        let twice = once.with_tag("Urgent");
        assert_eq!(once.tags.len(), app.tags.len() + 1);
        assert_eq!(twice, once);
    }

    #[test]
    fn tag_removal_is_idempotent() {
        let app = sample().with_tag("Urgent").with_tag("Senior");
        let removed = app.without_tag("Urgent");
        assert_eq!(removed.tags, vec!["Senior".to_string()]);
        assert_eq!(removed.without_tag("Urgent"), removed);
    }

    #[test]
    fn status_parses_only_the_five_known_values() {
        for status in ApplicationStatus::ALL {
            assert_eq!(
                ApplicationStatus::from_str(status.as_str()).unwrap(),
                status
            );
        }
        assert!(ApplicationStatus::from_str("Archived")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn wire_format_uses_camel_case_field_names() {
        let app = sample().with_tag("Urgent");
        let json = serde_json::to_value(&app).unwrap();
        assert!(json.get("candidateRef").is_some());
        assert!(json.get("vacancyRef").is_some());
        assert!(json.get("submittedAt").is_some());
        assert_eq!(json["status"], "New");
    }
}
