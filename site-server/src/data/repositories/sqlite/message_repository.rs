use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::{limit_offset, map_storage_error};
use crate::data::listing::{ListParams, Listing};
use crate::data::message_repository::{MessagePatch, MessageRepository, NewMessage};
use crate::domain::error::DomainError;
use crate::domain::message::Message;

#[derive(Debug, Clone)]
pub(crate) struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    name: String,
    mail: Option<String>,
    body: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn insert(&self, input: NewMessage) -> Result<Message, DomainError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (name, mail, body, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, mail, body, created_at
            "#,
        )
        .bind(input.name)
        .bind(input.mail)
        .bind(input.body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_storage_error)?;

        map_row_to_message(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Message>, DomainError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, name, mail, body, created_at
            FROM messages
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_storage_error)?;

        row.map(map_row_to_message).transpose()
    }

    async fn list(&self, params: ListParams) -> Result<Listing<Message>, DomainError> {
        let (limit, offset) = limit_offset(params.limit, params.offset);
        let sql = format!(
            "SELECT id, name, mail, body, created_at FROM messages {} LIMIT ?1 OFFSET ?2",
            params.order_clause()
        );

        let rows = sqlx::query_as::<_, MessageRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_storage_error)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
            .map_err(map_storage_error)?;

        let items = rows
            .into_iter()
            .map(map_row_to_message)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Listing { items, total })
    }

    async fn update(&self, id: i64, patch: MessagePatch) -> Result<Option<Message>, DomainError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            UPDATE messages
            SET name = ?2,
                mail = ?3,
                body = ?4
            WHERE id = ?1
            RETURNING id, name, mail, body, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.mail)
        .bind(patch.body)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_storage_error)?;

        row.map(map_row_to_message).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_message(row: MessageRow) -> Result<Message, DomainError> {
    Message::new(row.id, row.name, row.mail, row.body, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}
