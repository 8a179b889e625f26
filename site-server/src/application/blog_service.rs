use tracing::info;

use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::data::listing::{ListParams, OrderBy};
use crate::domain::blog::{Blog, BlogDraft};
use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paginated};

pub(crate) struct BlogService<R: BlogRepository> {
    repo: R,
}

impl<R: BlogRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(&self, draft: BlogDraft) -> Result<Blog, DomainError> {
        let draft = draft.validate()?;

        let blog = self
            .repo
            .insert(NewBlog {
                title: draft.title,
                text: draft.text,
            })
            .await?;
        info!(blog_id = blog.id, "blog post created");
        Ok(blog)
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Blog, DomainError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn update_post(&self, id: i64, draft: BlogDraft) -> Result<Blog, DomainError> {
        let draft = draft.validate()?;
        let patch = BlogPatch {
            title: draft.title,
            text: draft.text,
        };
        self.repo
            .update(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::NotFound(format!("post id: {id}")));
        }
        info!(blog_id = id, "blog post deleted");
        Ok(())
    }

    /// Newest first by creation time.
    pub(crate) async fn list_posts(
        &self,
        request: PageRequest,
    ) -> Result<Paginated<Blog>, DomainError> {
        self.list_page(OrderBy::CreatedAt, true, request).await
    }

    pub(crate) async fn list_page(
        &self,
        order_by: OrderBy,
        descending: bool,
        request: PageRequest,
    ) -> Result<Paginated<Blog>, DomainError> {
        let listing = self
            .repo
            .list(ListParams::page(order_by, descending, request))
            .await?;
        Ok(Paginated::new(listing.items, request, listing.total))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::BlogService;
    use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
    use crate::data::listing::{ListParams, Listing, OrderBy};
    use crate::domain::blog::{Blog, BlogDraft};
    use crate::domain::error::DomainError;
    use crate::domain::pagination::PageRequest;

    #[derive(Clone)]
    struct FakeBlogRepo {
        created_input: Arc<Mutex<Option<NewBlog>>>,
        post_for_get: Arc<Mutex<Option<Blog>>>,
        update_result: Arc<Mutex<Option<Blog>>>,
        update_call: Arc<Mutex<Option<(i64, BlogPatch)>>>,
        delete_result: Arc<Mutex<bool>>,
        list_call: Arc<Mutex<Option<ListParams>>>,
        list_result: Arc<Mutex<Vec<Blog>>>,
        total_result: Arc<Mutex<i64>>,
    }

    impl FakeBlogRepo {
        fn new() -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                post_for_get: Arc::new(Mutex::new(None)),
                update_result: Arc::new(Mutex::new(None)),
                update_call: Arc::new(Mutex::new(None)),
                delete_result: Arc::new(Mutex::new(true)),
                list_call: Arc::new(Mutex::new(None)),
                list_result: Arc::new(Mutex::new(Vec::new())),
                total_result: Arc::new(Mutex::new(0)),
            }
        }
    }

    #[async_trait]
    impl BlogRepository for FakeBlogRepo {
        async fn insert(&self, input: NewBlog) -> Result<Blog, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(sample_post(1, &input.title, &input.text))
        }

        async fn get_by_id(&self, _id: i64) -> Result<Option<Blog>, DomainError> {
            Ok(self
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned")
                .clone())
        }

        async fn list(&self, params: ListParams) -> Result<Listing<Blog>, DomainError> {
            *self.list_call.lock().expect("list_call mutex poisoned") = Some(params);
            Ok(Listing {
                items: self
                    .list_result
                    .lock()
                    .expect("list_result mutex poisoned")
                    .clone(),
                total: *self.total_result.lock().expect("total_result mutex poisoned"),
            })
        }

        async fn update(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError> {
            *self.update_call.lock().expect("update_call mutex poisoned") = Some((id, patch));
            Ok(self
                .update_result
                .lock()
                .expect("update_result mutex poisoned")
                .clone())
        }

        async fn delete(&self, _id: i64) -> Result<bool, DomainError> {
            Ok(*self.delete_result.lock().expect("delete_result mutex poisoned"))
        }
    }

    #[tokio::test]
    async fn create_post_normalizes_draft_before_repo_call() {
        let repo = FakeBlogRepo::new();
        let service = BlogService::new(repo.clone());

        let created = service
            .create_post(BlogDraft {
                title: "  title  ".to_string(),
                text: "  <p>content</p>  ".to_string(),
            })
            .await
            .expect("create_post must succeed");
        assert_eq!(created.title, "title");

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.title, "title");
        assert_eq!(input.text, "<p>content</p>");
    }

    #[tokio::test]
    async fn create_post_rejects_invalid_draft() {
        let repo = FakeBlogRepo::new();
        let service = BlogService::new(repo.clone());

        let err = service
            .create_post(BlogDraft {
                title: String::new(),
                text: "body".to_string(),
            })
            .await
            .expect_err("empty title");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
        assert!(
            repo.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn get_post_returns_not_found_when_missing() {
        let service = BlogService::new(FakeBlogRepo::new());

        let err = service.get_post(42).await.expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_passes_normalized_patch() {
        let repo = FakeBlogRepo::new();
        *repo
            .update_result
            .lock()
            .expect("update_result mutex poisoned") = Some(sample_post(7, "new", "body"));
        let service = BlogService::new(repo.clone());

        let updated = service
            .update_post(
                7,
                BlogDraft {
                    title: "  new  ".to_string(),
                    text: "  body  ".to_string(),
                },
            )
            .await
            .expect("update must succeed");
        assert_eq!(updated.id, 7);

        let (id, patch) = repo
            .update_call
            .lock()
            .expect("update_call mutex poisoned")
            .clone()
            .expect("update call must be captured");
        assert_eq!(id, 7);
        assert_eq!(patch.title, "new");
        assert_eq!(patch.text, "body");
    }

    #[tokio::test]
    async fn delete_post_maps_missing_row_to_not_found() {
        let repo = FakeBlogRepo::new();
        *repo.delete_result.lock().expect("delete_result mutex poisoned") = false;
        let service = BlogService::new(repo);

        let err = service.delete_post(7).await.expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_posts_is_newest_first_with_metadata() {
        let repo = FakeBlogRepo::new();
        *repo.list_result.lock().expect("list_result mutex poisoned") =
            vec![sample_post(7, "a", "b")];
        *repo.total_result.lock().expect("total_result mutex poisoned") = 7;
        let service = BlogService::new(repo.clone());

        let page = service
            .list_posts(PageRequest::new(3, 3))
            .await
            .expect("list_posts must succeed");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
        assert!(page.has_prev());

        let params = (*repo.list_call.lock().expect("list_call mutex poisoned"))
            .expect("list must be called");
        assert_eq!(params.order_by, OrderBy::CreatedAt);
        assert!(params.descending);
        assert_eq!(params.offset, 6);
        assert_eq!(params.limit, 3);
    }

    fn sample_post(id: i64, title: &str, text: &str) -> Blog {
        Blog::new(id, title, text, Utc::now()).expect("sample post must be valid")
    }
}
