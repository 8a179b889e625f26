use async_trait::async_trait;

use super::listing::{ListParams, Listing};
use crate::domain::error::DomainError;
use crate::domain::message::Message;

#[derive(Debug, Clone)]
pub(crate) struct NewMessage {
    pub(crate) name: String,
    pub(crate) mail: Option<String>,
    pub(crate) body: String,
}

#[derive(Debug, Clone)]
pub(crate) struct MessagePatch {
    pub(crate) name: String,
    pub(crate) mail: Option<String>,
    pub(crate) body: String,
}

#[async_trait]
pub(crate) trait MessageRepository: Send + Sync {
    async fn insert(&self, input: NewMessage) -> Result<Message, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Message>, DomainError>;
    async fn list(&self, params: ListParams) -> Result<Listing<Message>, DomainError>;
    async fn update(&self, id: i64, patch: MessagePatch) -> Result<Option<Message>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
