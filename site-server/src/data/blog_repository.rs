use async_trait::async_trait;

use super::listing::{ListParams, Listing};
use crate::domain::blog::Blog;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewBlog {
    pub(crate) title: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone)]
pub(crate) struct BlogPatch {
    pub(crate) title: String,
    pub(crate) text: String,
}

#[async_trait]
pub(crate) trait BlogRepository: Send + Sync {
    async fn insert(&self, input: NewBlog) -> Result<Blog, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Blog>, DomainError>;
    async fn list(&self, params: ListParams) -> Result<Listing<Blog>, DomainError>;
    async fn update(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
