use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use super::PageQuery;
use crate::domain::error::DomainError;
use crate::domain::message::SubmitMessageRequest;
use crate::domain::pagination::PageRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::flash::{self, Flash};
use crate::presentation::http::forms::FieldErrors;
use crate::presentation::http::views::guestbook::{GuestbookForm, guestbook_page};

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct GuestbookFormDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 20, message = "must be 1..20 chars"))]
    pub(crate) name: String,
    #[serde(default)]
    #[validate(length(max = 40, message = "must be at most 40 chars"))]
    pub(crate) mail: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "must be 1..200 chars"))]
    pub(crate) content: String,
}

pub(crate) async fn show_guestbook(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> AppResult<Response> {
    let (jar, notice) = flash::take(jar);
    let request = PageRequest::from_query(query.page.as_deref(), state.site.guestbook_page_size);
    let messages = state.guestbook_service.list_messages(request).await?;

    let page = guestbook_page(
        &GuestbookForm::default(),
        &FieldErrors::default(),
        notice,
        &messages,
    );
    Ok((jar, page).into_response())
}

pub(crate) async fn submit_message(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(dto): Form<GuestbookFormDto>,
) -> AppResult<Response> {
    if let Err(errors) = dto.validate() {
        return rerender(&state, &dto, FieldErrors::from(&errors)).await;
    }

    let req = SubmitMessageRequest {
        name: dto.name.clone(),
        mail: Some(dto.mail.clone()),
        body: dto.content.clone(),
    };

    match state.guestbook_service.submit(req).await {
        Ok(_) => Ok((flash::set(jar, Flash::MessagePosted), Redirect::to("/")).into_response()),
        Err(err @ DomainError::Validation { .. }) => {
            let errors = FieldErrors::from_domain(&err).unwrap_or_default();
            rerender(&state, &dto, errors).await
        }
        Err(err) => Err(err.into()),
    }
}

/// Failed submissions keep what the visitor typed and answer 200.
async fn rerender(
    state: &AppState,
    dto: &GuestbookFormDto,
    errors: FieldErrors,
) -> AppResult<Response> {
    let request = PageRequest::new(1, state.site.guestbook_page_size);
    let messages = state.guestbook_service.list_messages(request).await?;
    let form = GuestbookForm {
        name: &dto.name,
        mail: &dto.mail,
        content: &dto.content,
    };

    Ok(guestbook_page(&form, &errors, None, &messages).into_response())
}
