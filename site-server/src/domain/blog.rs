use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

pub(crate) const TITLE_MAX_CHARS: usize = 120;
/// Posts per page on the public blog listing.
pub(crate) const BLOG_PAGE_SIZE: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Blog {
    pub(crate) id: i64,
    pub(crate) title: String,
    /// Rich-text (HTML) body.
    pub(crate) text: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Blog {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        text: impl Into<String>,
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
            title: title.into(),
            text: text.into(),
            created_at,
        })
    }
}

/// Title and body of a post, used for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BlogDraft {
    pub(crate) title: String,
    pub(crate) text: String,
}

impl BlogDraft {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            text: normalize_text(&self.text)?,
        })
    }
}

/// Fixed offset applied when a single post's timestamp is displayed.
/// Stored timestamps stay UTC; the shift happens per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DisplayOffset {
    offset: FixedOffset,
}

impl DisplayOffset {
    pub(crate) fn from_hours(hours: i32) -> Result<Self, DomainError> {
        let offset = Some(hours)
            .filter(|hours| (-23..=23).contains(hours))
            .and_then(|hours| FixedOffset::east_opt(hours * 3600))
            .ok_or(DomainError::Validation {
                field: "display_offset",
                message: "must be within -23..=23 hours",
            })?;
        Ok(Self { offset })
    }

    pub(crate) fn hours(&self) -> i32 {
        self.offset.local_minus_utc() / 3600
    }

    pub(crate) fn apply(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset)
    }
}

impl Default for DisplayOffset {
    fn default() -> Self {
        Self::from_hours(8).unwrap_or(Self {
            offset: Utc.fix(),
        })
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..120 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::Validation {
            field: "text",
            message: "must not be empty",
        });
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Blog, BlogDraft, DisplayOffset, DomainError};

    #[test]
    fn draft_validate_normalizes_fields() {
        let draft = BlogDraft {
            title: "  title  ".to_string(),
            text: "  <p>body</p>  ".to_string(),
        };

        let validated = draft.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.text, "<p>body</p>");
    }

    #[test]
    fn draft_validate_rejects_long_title() {
        let draft = BlogDraft {
            title: "t".repeat(121),
            text: "body".to_string(),
        };

        let err = draft.validate().expect_err("title must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
    }

    #[test]
    fn draft_validate_rejects_empty_text() {
        let draft = BlogDraft {
            title: "title".to_string(),
            text: "   ".to_string(),
        };

        let err = draft.validate().expect_err("text must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "text", .. }));
    }

    #[test]
    fn blog_new_rejects_non_positive_id() {
        assert!(Blog::new(0, "title", "text", Utc::now()).is_err());
    }

    #[test]
    fn display_offset_shifts_wall_clock_forward() {
        let stored = Utc
            .with_ymd_and_hms(2024, 1, 1, 20, 30, 0)
            .single()
            .expect("valid timestamp");
        let offset = DisplayOffset::default();

        let shown = offset.apply(stored).format("%Y-%m-%d %H:%M:%S").to_string();
        assert_eq!(shown, "2024-01-02 04:30:00");
        assert_eq!(offset.hours(), 8);
    }

    #[test]
    fn display_offset_is_bounded() {
        assert!(DisplayOffset::from_hours(24).is_err());
        assert!(DisplayOffset::from_hours(-23).is_ok());
    }
}
