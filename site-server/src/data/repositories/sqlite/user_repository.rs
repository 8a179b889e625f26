use async_trait::async_trait;
use sqlx::SqlitePool;

use super::map_storage_error;
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    password_hash: String,
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?1, ?2)
            RETURNING id, username
            "#,
        )
        .bind(input.username)
        .bind(input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        User::new(row.id, row.username).map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        if let Some(r) = row {
            let user = User::new(r.id, r.username)
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;

            Ok(Some(UserCredentials {
                user,
                password_hash: r.password_hash,
            }))
        } else {
            Ok(None)
        }
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return DomainError::AlreadyExists("username".to_string());
    }
    map_storage_error(err)
}

#[cfg(test)]
mod tests {
    use super::SqliteUserRepository;
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::error::DomainError;
    use crate::infrastructure::database::memory_pool;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_find_by_username() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        let user = repo.create_user(new_user("admin")).await.expect("create");

        let creds = repo
            .find_by_username("admin")
            .await
            .expect("find")
            .expect("user must exist");
        assert_eq!(creds.user.id, user.id);
        assert_eq!(creds.password_hash, "$argon2id$placeholder");
        assert!(repo.find_by_username("nobody").await.expect("find").is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_already_exists() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        repo.create_user(new_user("admin")).await.expect("create");

        let err = repo
            .create_user(new_user("admin"))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }
}
