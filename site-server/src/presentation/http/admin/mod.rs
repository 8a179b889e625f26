//! Generic model admin. Each entity describes itself once through
//! [`AdminEntity`]; [`ModelAdmin`] turns an entity plus its [`AdminStore`]
//! into an object-safe [`AdminView`] that the registry can hold.

pub(crate) mod blog;
pub(crate) mod message;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paginated};
use crate::presentation::http::forms::FormValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    Email,
    /// Edited through the rich-text editor widget.
    RichText,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormField {
    pub(crate) name: &'static str,
    pub(crate) label: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
    pub(crate) max_chars: Option<usize>,
}

pub(crate) trait AdminEntity: Send + Sync + Sized + 'static {
    type Draft: Send;

    const SLUG: &'static str;
    const NAME: &'static str;

    fn id(&self) -> i64;
    /// Column headers of the list view, matching [`AdminEntity::list_row`].
    fn list_fields() -> &'static [&'static str];
    fn list_row(&self) -> Vec<String>;
    fn form_fields() -> &'static [FormField];
    fn to_form(&self) -> FormValues;
    /// Unvalidated draft; the store validates before writing.
    fn from_form(form: &FormValues) -> Self::Draft;
}

#[async_trait]
pub(crate) trait AdminStore<E: AdminEntity>: Send + Sync {
    async fn list(&self, request: PageRequest) -> Result<Paginated<E>, DomainError>;
    async fn get(&self, id: i64) -> Result<E, DomainError>;
    async fn create(&self, draft: E::Draft) -> Result<E, DomainError>;
    async fn update(&self, id: i64, draft: E::Draft) -> Result<E, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

#[derive(Debug, Clone)]
pub(crate) struct AdminRow {
    pub(crate) id: i64,
    pub(crate) cells: Vec<String>,
}

#[async_trait]
pub(crate) trait AdminView: Send + Sync {
    fn slug(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn columns(&self) -> &'static [&'static str];
    fn form_fields(&self) -> &'static [FormField];

    async fn list(&self, request: PageRequest) -> Result<Paginated<AdminRow>, DomainError>;
    async fn load_form(&self, id: i64) -> Result<FormValues, DomainError>;
    async fn create(&self, form: &FormValues) -> Result<i64, DomainError>;
    async fn update(&self, id: i64, form: &FormValues) -> Result<i64, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

pub(crate) struct ModelAdmin<E, S> {
    store: Arc<S>,
    entity: PhantomData<fn() -> E>,
}

impl<E, S> ModelAdmin<E, S>
where
    E: AdminEntity,
    S: AdminStore<E>,
{
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self {
            store,
            entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, S> AdminView for ModelAdmin<E, S>
where
    E: AdminEntity,
    S: AdminStore<E> + 'static,
{
    fn slug(&self) -> &'static str {
        E::SLUG
    }

    fn name(&self) -> &'static str {
        E::NAME
    }

    fn columns(&self) -> &'static [&'static str] {
        E::list_fields()
    }

    fn form_fields(&self) -> &'static [FormField] {
        E::form_fields()
    }

    async fn list(&self, request: PageRequest) -> Result<Paginated<AdminRow>, DomainError> {
        let page = self.store.list(request).await?;
        let rows = page
            .items
            .iter()
            .map(|record| AdminRow {
                id: record.id(),
                cells: record.list_row(),
            })
            .collect();
        Ok(Paginated::new(
            rows,
            PageRequest::new(page.page, page.page_size),
            page.total,
        ))
    }

    async fn load_form(&self, id: i64) -> Result<FormValues, DomainError> {
        Ok(self.store.get(id).await?.to_form())
    }

    async fn create(&self, form: &FormValues) -> Result<i64, DomainError> {
        let record = self.store.create(E::from_form(form)).await?;
        Ok(record.id())
    }

    async fn update(&self, id: i64, form: &FormValues) -> Result<i64, DomainError> {
        let record = self.store.update(id, E::from_form(form)).await?;
        Ok(record.id())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.store.delete(id).await
    }
}

/// Admin views by URL slug, assembled once at startup.
#[derive(Default)]
pub(crate) struct AdminRegistry {
    views: Vec<Arc<dyn AdminView>>,
}

impl AdminRegistry {
    pub(crate) fn register(mut self, view: Arc<dyn AdminView>) -> Self {
        self.views.push(view);
        self
    }

    pub(crate) fn get(&self, slug: &str) -> Option<Arc<dyn AdminView>> {
        self.views.iter().find(|view| view.slug() == slug).cloned()
    }

    pub(crate) fn views(&self) -> &[Arc<dyn AdminView>] {
        &self.views
    }
}

pub(crate) fn form_value(form: &FormValues, field: &str) -> String {
    form.get(field).cloned().unwrap_or_default()
}
