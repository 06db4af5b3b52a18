//! Contact-form submissions and their triage workflow.

mod inbox;

pub use inbox::{Inbox, InboxStats, ListQuery};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when handling contact submissions
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ContactError {
    #[error("submission '{0}' not found")]
    NotFound(String),

    #[error("cannot move a submission from '{from}' to '{to}'")]
    InvalidTransition { from: ContactStatus, to: ContactStatus },

    #[error("invalid submission: {0}")]
    Validation(String),

    #[error("unknown status '{0}', expected one of: new, read, responded")]
    UnknownStatus(String),
}

/// Where a submission is in the triage workflow
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Responded,
}

impl ContactStatus {
    /// The status a submission moves to next, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::Read),
            Self::Read => Some(Self::Responded),
            Self::Responded => None,
        }
    }

    pub fn can_transition_to(self, to: Self) -> bool {
        self.next() == Some(to)
    }

    pub fn parse(status: &str) -> Result<Self, ContactError> {
        status.trim().parse().map_err(|_| ContactError::UnknownStatus(status.to_string()))
    }
}

/// Read a submission id. Anything that isn't a UUID can't name a stored submission.
pub fn parse_id(id: &str) -> Result<Uuid, ContactError> {
    Uuid::parse_str(id.trim()).map_err(|_| ContactError::NotFound(id.to_string()))
}

/// What a visitor fills in on the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl NewSubmission {
    /// Trim every field and check it is usable.
    pub fn normalize(self) -> Result<Self, ContactError> {
        let submission = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        for (field, value) in [
            ("name", &submission.name),
            ("subject", &submission.subject),
            ("message", &submission.message),
        ] {
            if value.is_empty() {
                return Err(ContactError::Validation(format!("{field} must not be empty")));
            }
        }
        if !is_plausible_email(&submission.email) {
            return Err(ContactError::Validation(format!("'{}' is not a valid email address", submission.email)));
        }
        Ok(submission)
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// A stored contact-form message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub submitted_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn new(submission: NewSubmission) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            status: ContactStatus::New,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> NewSubmission {
        NewSubmission {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[rstest]
    #[case(ContactStatus::New, ContactStatus::Read, true)]
    #[case(ContactStatus::Read, ContactStatus::Responded, true)]
    #[case(ContactStatus::New, ContactStatus::Responded, false)]
    #[case(ContactStatus::Read, ContactStatus::New, false)]
    #[case(ContactStatus::Responded, ContactStatus::Read, false)]
    #[case(ContactStatus::New, ContactStatus::New, false)]
    fn transitions(#[case] from: ContactStatus, #[case] to: ContactStatus, #[case] allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    #[case("new", ContactStatus::New)]
    #[case("read", ContactStatus::Read)]
    #[case(" responded ", ContactStatus::Responded)]
    fn parses_status(#[case] input: &str, #[case] expected: ContactStatus) {
        assert_eq!(ContactStatus::parse(input), Ok(expected));
    }

    #[test]
    fn unknown_status() {
        assert_eq!(ContactStatus::parse("archived"), Err(ContactError::UnknownStatus("archived".into())));
    }

    #[test]
    fn status_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&ContactStatus::Responded).expect("serializable"), "\"responded\"");
        assert_eq!(ContactStatus::Read.to_string(), "read");
    }

    #[test]
    fn normalize_trims_fields() {
        let submission = form("  Sarah ", " sarah@techcorp.com ", " Hello ", " Hi there ").normalize().expect("valid");
        assert_eq!(submission, form("Sarah", "sarah@techcorp.com", "Hello", "Hi there"));
    }

    #[rstest]
    #[case::empty_name(form("", "a@b.co", "s", "m"))]
    #[case::blank_subject(form("n", "a@b.co", "   ", "m"))]
    #[case::empty_message(form("n", "a@b.co", "s", ""))]
    #[case::no_at(form("n", "invalid-email", "s", "m"))]
    #[case::no_dot(form("n", "a@localhost", "s", "m"))]
    #[case::empty_label(form("n", "a@b.", "s", "m"))]
    #[case::two_ats(form("n", "a@b@c.com", "s", "m"))]
    #[case::space(form("n", "a b@c.com", "s", "m"))]
    fn rejects_invalid_forms(#[case] submission: NewSubmission) {
        assert!(matches!(submission.normalize(), Err(ContactError::Validation(_))));
    }

    #[test]
    fn new_submissions_start_as_new() {
        let submission = ContactSubmission::new(form("n", "a@b.co", "s", "m"));
        assert_eq!(submission.status, ContactStatus::New);
        let value = serde_json::to_value(&submission).expect("serializable");
        assert_eq!(value["status"], "new");
        assert!(value.get("submittedAt").is_some());
    }

    #[test]
    fn ids_that_are_not_uuids_are_not_found() {
        assert_eq!(parse_id("abc123"), Err(ContactError::NotFound("abc123".into())));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Ok(id));
    }
}
