use serde::{Deserialize, Serialize};

use super::error::DomainError;

const USERNAME_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreateUserRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl CreateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let password_len = self.password.chars().count();
        if !(8..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            username,
            password: self.password,
        })
    }
}

/// Admin principal.
#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
}

impl User {
    pub(crate) fn new(id: i64, username: impl Into<String>) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_username(&username.into())?;

        Ok(Self { id, username })
    }
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if len == 0 || len > USERNAME_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 1..20 chars",
        });
    }
    Ok(username.to_string())
}
