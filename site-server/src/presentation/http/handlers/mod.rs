pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod blog;
pub(crate) mod guestbook;
pub(crate) mod health;

use serde::Deserialize;

use super::app_error::AppError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    pub(crate) page: Option<String>,
}

/// Path identifiers that are not positive integers name nothing.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parse_id_accepts_positive_integers_only() {
        assert_eq!(parse_id("12").ok(), Some(12));
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("1.5").is_err());
    }
}
