use async_trait::async_trait;

use super::{AdminEntity, AdminStore, FieldKind, FormField, form_value};
use crate::application::blog_service::BlogService;
use crate::data::blog_repository::BlogRepository;
use crate::data::listing::OrderBy;
use crate::domain::blog::{Blog, BlogDraft, TITLE_MAX_CHARS};
use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paginated};
use crate::presentation::http::forms::FormValues;
use crate::presentation::http::views::TIMESTAMP_FORMAT;

const FORM_FIELDS: &[FormField] = &[
    FormField {
        name: "title",
        label: "Title",
        kind: FieldKind::Text,
        required: true,
        max_chars: Some(TITLE_MAX_CHARS),
    },
    FormField {
        name: "text",
        label: "Text",
        kind: FieldKind::RichText,
        required: true,
        max_chars: None,
    },
];

impl AdminEntity for Blog {
    type Draft = BlogDraft;

    const SLUG: &'static str = "blog";
    const NAME: &'static str = "Blog posts";

    fn id(&self) -> i64 {
        self.id
    }

    fn list_fields() -> &'static [&'static str] {
        &["ID", "Title", "Created (UTC)"]
    }

    fn list_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        FORM_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::from([
            ("title".to_string(), self.title.clone()),
            ("text".to_string(), self.text.clone()),
        ])
    }

    fn from_form(form: &FormValues) -> BlogDraft {
        BlogDraft {
            title: form_value(form, "title"),
            text: form_value(form, "text"),
        }
    }
}

#[async_trait]
impl<R: BlogRepository> AdminStore<Blog> for BlogService<R> {
    async fn list(&self, request: PageRequest) -> Result<Paginated<Blog>, DomainError> {
        self.list_page(OrderBy::Id, true, request).await
    }

    async fn get(&self, id: i64) -> Result<Blog, DomainError> {
        self.get_post(id).await
    }

    async fn create(&self, draft: BlogDraft) -> Result<Blog, DomainError> {
        self.create_post(draft).await
    }

    async fn update(&self, id: i64, draft: BlogDraft) -> Result<Blog, DomainError> {
        self.update_post(id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.delete_post(id).await
    }
}
