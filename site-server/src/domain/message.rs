use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

pub(crate) const NAME_MAX_CHARS: usize = 20;
pub(crate) const MAIL_MAX_CHARS: usize = 40;
pub(crate) const SUBMISSION_BODY_MAX_CHARS: usize = 200;

/// Guestbook entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Message {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) mail: Option<String>,
    pub(crate) body: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(
        id: i64,
        name: impl Into<String>,
        mail: Option<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            mail,
            body: body.into(),
            created_at,
        })
    }
}

/// Public guestbook submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SubmitMessageRequest {
    pub(crate) name: String,
    pub(crate) mail: Option<String>,
    pub(crate) body: String,
}

impl SubmitMessageRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_name(&self.name)?;
        let mail = normalize_mail(self.mail.as_deref())?;
        let body = self.body.trim();
        let body_len = body.chars().count();
        if body_len == 0 || body_len > SUBMISSION_BODY_MAX_CHARS {
            return Err(DomainError::Validation {
                field: "content",
                message: "must be 1..200 chars",
            });
        }

        Ok(Self {
            name,
            mail,
            body: body.to_string(),
        })
    }
}

/// Whole-value replacement of a message, as edited from the admin.
/// The body comes from the rich-text editor and has no upper bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MessageDraft {
    pub(crate) name: String,
    pub(crate) mail: Option<String>,
    pub(crate) body: String,
}

impl MessageDraft {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_name(&self.name)?;
        let mail = normalize_mail(self.mail.as_deref())?;
        let body = self.body.trim();
        if body.is_empty() {
            return Err(DomainError::Validation {
                field: "body",
                message: "must not be empty",
            });
        }

        Ok(Self {
            name,
            mail,
            body: body.to_string(),
        })
    }
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..20 chars",
        });
    }
    Ok(name.to_string())
}

fn normalize_mail(mail: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(mail) = mail.map(str::trim).filter(|mail| !mail.is_empty()) else {
        return Ok(None);
    };

    if mail.chars().count() > MAIL_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "mail",
            message: "must be at most 40 chars",
        });
    }
    if !mail.validate_email() {
        return Err(DomainError::Validation {
            field: "mail",
            message: "must be a valid email",
        });
    }
    Ok(Some(mail.to_string()))
}
