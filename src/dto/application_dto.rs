use serde::{Deserialize, Serialize};
use validator::Validate;

/// Public submit-form payload: the candidate's details plus the vacancy
/// they are applying to. The resume URL, when present, comes from the
/// storage collaborator and is treated as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitApplicationPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7))]
    pub phone: String,
    pub city: Option<String>,
    #[validate(length(min = 1))]
    pub experience: String,
    /// Raw textarea text, one skill per line.
    #[serde(default)]
    pub skills: String,
    pub resume_url: Option<String>,
    #[validate(length(min = 1))]
    pub vacancy_slug: String,
}

/// Admin payload for annotating an application.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddNotePayload {
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 1))]
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SubmitApplicationPayload {
        SubmitApplicationPayload {
            name: "Carlos".to_string(),
            last_name: Some("Ramirez".to_string()),
            email: "carlos.ramirez@example.com".to_string(),
            phone: "5534567890".to_string(),
            city: Some("Guadalajara".to_string()),
            experience: "3-5 years".to_string(),
            skills: "Artisan baking\nTime management\n".to_string(),
            resume_url: None,
            vacancy_slug: "master-baker".to_string(),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn malformed_email_fails() {
        let mut bad = payload();
        bad.email = "not-an-email".to_string();
        assert!(bad.validate().is_err());
    }
}
