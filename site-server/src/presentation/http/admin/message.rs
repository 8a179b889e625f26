use async_trait::async_trait;

use super::{AdminEntity, AdminStore, FieldKind, FormField, form_value};
use crate::application::guestbook_service::GuestbookService;
use crate::data::listing::OrderBy;
use crate::data::message_repository::MessageRepository;
use crate::domain::error::DomainError;
use crate::domain::message::{MAIL_MAX_CHARS, Message, MessageDraft, NAME_MAX_CHARS};
use crate::domain::pagination::{PageRequest, Paginated};
use crate::presentation::http::forms::FormValues;
use crate::presentation::http::views::TIMESTAMP_FORMAT;

const PREVIEW_CHARS: usize = 40;

const FORM_FIELDS: &[FormField] = &[
    FormField {
        name: "name",
        label: "Name",
        kind: FieldKind::Text,
        required: true,
        max_chars: Some(NAME_MAX_CHARS),
    },
    FormField {
        name: "mail",
        label: "Mail",
        kind: FieldKind::Email,
        required: false,
        max_chars: Some(MAIL_MAX_CHARS),
    },
    FormField {
        name: "body",
        label: "Body",
        kind: FieldKind::RichText,
        required: true,
        max_chars: None,
    },
];

impl AdminEntity for Message {
    type Draft = MessageDraft;

    const SLUG: &'static str = "message";
    const NAME: &'static str = "Guestbook messages";

    fn id(&self) -> i64 {
        self.id
    }

    fn list_fields() -> &'static [&'static str] {
        &["ID", "Name", "Mail", "Body", "Created (UTC)"]
    }

    fn list_row(&self) -> Vec<String> {
        let mut preview: String = self.body.chars().take(PREVIEW_CHARS).collect();
        if self.body.chars().count() > PREVIEW_CHARS {
            preview.push('…');
        }
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.mail.clone().unwrap_or_default(),
            preview,
            self.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        FORM_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::from([
            ("name".to_string(), self.name.clone()),
            ("mail".to_string(), self.mail.clone().unwrap_or_default()),
            ("body".to_string(), self.body.clone()),
        ])
    }

    fn from_form(form: &FormValues) -> MessageDraft {
        MessageDraft {
            name: form_value(form, "name"),
            mail: Some(form_value(form, "mail")),
            body: form_value(form, "body"),
        }
    }
}

#[async_trait]
impl<R: MessageRepository> AdminStore<Message> for GuestbookService<R> {
    async fn list(&self, request: PageRequest) -> Result<Paginated<Message>, DomainError> {
        self.list_page(OrderBy::Id, true, request).await
    }

    async fn get(&self, id: i64) -> Result<Message, DomainError> {
        self.get_message(id).await
    }

    async fn create(&self, draft: MessageDraft) -> Result<Message, DomainError> {
        self.create_message(draft).await
    }

    async fn update(&self, id: i64, draft: MessageDraft) -> Result<Message, DomainError> {
        self.update_message(id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.delete_message(id).await
    }
}
