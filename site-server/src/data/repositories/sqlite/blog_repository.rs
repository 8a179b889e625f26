use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::{limit_offset, map_storage_error};
use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::data::listing::{ListParams, Listing};
use crate::domain::blog::Blog;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct SqliteBlogRepository {
    pool: SqlitePool,
}

impl SqliteBlogRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    text: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn insert(&self, input: NewBlog) -> Result<Blog, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (title, text, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, title, text, created_at
            "#,
        )
        .bind(input.title)
        .bind(input.text)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_storage_error)?;

        map_row_to_blog(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, text, created_at
            FROM blogs
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_storage_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn list(&self, params: ListParams) -> Result<Listing<Blog>, DomainError> {
        let (limit, offset) = limit_offset(params.limit, params.offset);
        let sql = format!(
            "SELECT id, title, text, created_at FROM blogs {} LIMIT ?1 OFFSET ?2",
            params.order_clause()
        );

        let rows = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_storage_error)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_storage_error)?;

        let items = rows
            .into_iter()
            .map(map_row_to_blog)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Listing { items, total })
    }

    async fn update(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET title = ?2,
                text = ?3
            WHERE id = ?1
            RETURNING id, title, text, created_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_storage_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_blog(row: BlogRow) -> Result<Blog, DomainError> {
    Blog::new(row.id, row.title, row.text, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::SqliteBlogRepository;
    use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
    use crate::data::listing::{ListParams, OrderBy};
    use crate::domain::pagination::PageRequest;
    use crate::infrastructure::database::memory_pool;

    async fn seed(repo: &SqliteBlogRepository, count: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(count);
        for n in 1..=count {
            let blog = repo
                .insert(NewBlog {
                    title: format!("post {n}"),
                    text: format!("<p>body {n}</p>"),
                })
                .await
                .expect("insert");
            ids.push(blog.id);
        }
        ids
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let repo = SqliteBlogRepository::new(memory_pool().await);
        seed(&repo, 7).await;

        let titles = |page: u32| {
            let repo = repo.clone();
            async move {
                let params =
                    ListParams::page(OrderBy::CreatedAt, true, PageRequest::new(page, 3));
                let listing = repo.list(params).await.expect("list");
                assert_eq!(listing.total, 7);
                listing
                    .items
                    .into_iter()
                    .map(|blog| blog.title)
                    .collect::<Vec<_>>()
            }
        };

        assert_eq!(titles(1).await, ["post 7", "post 6", "post 5"]);
        assert_eq!(titles(2).await, ["post 4", "post 3", "post 2"]);
        assert_eq!(titles(3).await, ["post 1"]);
        assert!(titles(4).await.is_empty());
    }

    #[tokio::test]
    async fn update_keeps_id_and_timestamp() {
        let repo = SqliteBlogRepository::new(memory_pool().await);
        let ids = seed(&repo, 1).await;
        let before = repo.get_by_id(ids[0]).await.expect("get").expect("exists");

        let after = repo
            .update(
                ids[0],
                BlogPatch {
                    title: "renamed".to_string(),
                    text: "<p>new</p>".to_string(),
                },
            )
            .await
            .expect("update")
            .expect("exists");

        assert_eq!(after.id, before.id);
        assert_eq!(after.title, "renamed");
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = SqliteBlogRepository::new(memory_pool().await);
        let ids = seed(&repo, 2).await;

        assert!(repo.delete(ids[0]).await.expect("delete"));
        assert!(repo.get_by_id(ids[0]).await.expect("get").is_none());
        assert!(!repo.delete(ids[0]).await.expect("second delete"));
    }
}
