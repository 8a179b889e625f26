pub(crate) mod blog_repository;
pub(crate) mod message_repository;
pub(crate) mod user_repository;

use crate::domain::error::DomainError;

pub(crate) fn map_storage_error(err: sqlx::Error) -> DomainError {
    DomainError::Storage(err.to_string())
}

pub(crate) fn limit_offset(limit: u32, offset: u32) -> (i64, i64) {
    (i64::from(limit), i64::from(offset))
}
