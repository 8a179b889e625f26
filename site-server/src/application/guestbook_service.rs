use tracing::info;

use crate::data::listing::{ListParams, OrderBy};
use crate::data::message_repository::{MessagePatch, MessageRepository, NewMessage};
use crate::domain::error::DomainError;
use crate::domain::message::{Message, MessageDraft, SubmitMessageRequest};
use crate::domain::pagination::{PageRequest, Paginated};

pub(crate) struct GuestbookService<R: MessageRepository> {
    repo: R,
}

impl<R: MessageRepository> GuestbookService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn submit(&self, req: SubmitMessageRequest) -> Result<Message, DomainError> {
        let req = req.validate()?;

        let message = self
            .repo
            .insert(NewMessage {
                name: req.name,
                mail: req.mail,
                body: req.body,
            })
            .await?;
        info!(message_id = message.id, "guestbook message stored");
        Ok(message)
    }

    /// Admin-side insert; the body is rich text without the public length cap.
    pub(crate) async fn create_message(&self, draft: MessageDraft) -> Result<Message, DomainError> {
        let draft = draft.validate()?;

        let message = self
            .repo
            .insert(NewMessage {
                name: draft.name,
                mail: draft.mail,
                body: draft.body,
            })
            .await?;
        info!(message_id = message.id, "guestbook message created by admin");
        Ok(message)
    }

    /// Oldest first.
    pub(crate) async fn list_messages(
        &self,
        request: PageRequest,
    ) -> Result<Paginated<Message>, DomainError> {
        self.list_page(OrderBy::CreatedAt, false, request).await
    }

    pub(crate) async fn list_page(
        &self,
        order_by: OrderBy,
        descending: bool,
        request: PageRequest,
    ) -> Result<Paginated<Message>, DomainError> {
        let listing = self
            .repo
            .list(ListParams::page(order_by, descending, request))
            .await?;
        Ok(Paginated::new(listing.items, request, listing.total))
    }

    pub(crate) async fn get_message(&self, id: i64) -> Result<Message, DomainError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message id: {id}")))
    }

    pub(crate) async fn update_message(
        &self,
        id: i64,
        draft: MessageDraft,
    ) -> Result<Message, DomainError> {
        let draft = draft.validate()?;
        let patch = MessagePatch {
            name: draft.name,
            mail: draft.mail,
            body: draft.body,
        };
        self.repo
            .update(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message id: {id}")))
    }

    pub(crate) async fn delete_message(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::NotFound(format!("message id: {id}")));
        }
        info!(message_id = id, "guestbook message deleted");
        Ok(())
    }
}
