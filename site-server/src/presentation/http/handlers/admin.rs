use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use super::{PageQuery, parse_id};
use crate::domain::error::DomainError;
use crate::domain::pagination::PageRequest;
use crate::presentation::AppState;
use crate::presentation::http::admin::AdminView;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::flash::{self, Flash};
use crate::presentation::http::forms::{FieldErrors, FormValues};
use crate::presentation::http::middleware::auth::AdminPrincipal;
use crate::presentation::http::views::admin::{FormMode, form_page, index_page, list_page};

fn resolve_view(state: &AppState, slug: &str) -> Result<Arc<dyn AdminView>, AppError> {
    state.admin.get(slug).ok_or(AppError::NotFound)
}

pub(crate) async fn index(
    State(state): State<AppState>,
    Extension(principal): Extension<AdminPrincipal>,
) -> Html<String> {
    index_page(state.admin.views(), &principal.username)
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> AppResult<Response> {
    let view = resolve_view(&state, &slug)?;
    let request = PageRequest::from_query(query.page.as_deref(), state.site.admin_page_size);
    let rows = view.list(request).await?;
    let (jar, notice) = flash::take(jar);

    Ok((jar, list_page(view.as_ref(), &rows, notice)).into_response())
}

pub(crate) async fn create_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let view = resolve_view(&state, &slug)?;

    Ok(render_form(
        &state,
        view.as_ref(),
        &FormMode::Create,
        &FormValues::new(),
        &FieldErrors::default(),
    ))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    jar: CookieJar,
    Form(form): Form<FormValues>,
) -> AppResult<Response> {
    let view = resolve_view(&state, &slug)?;
    let result = view.create(&form).await.map(|_| ());

    finish_write(&state, view.as_ref(), &FormMode::Create, &form, jar, result)
}

pub(crate) async fn edit_form(
    State(state): State<AppState>,
    Path((slug, raw_id)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let view = resolve_view(&state, &slug)?;
    let id = parse_id(&raw_id)?;
    let values = view.load_form(id).await?;

    Ok(render_form(
        &state,
        view.as_ref(),
        &FormMode::Edit(id),
        &values,
        &FieldErrors::default(),
    ))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path((slug, raw_id)): Path<(String, String)>,
    jar: CookieJar,
    Form(form): Form<FormValues>,
) -> AppResult<Response> {
    let view = resolve_view(&state, &slug)?;
    let id = parse_id(&raw_id)?;
    let result = view.update(id, &form).await.map(|_| ());

    finish_write(&state, view.as_ref(), &FormMode::Edit(id), &form, jar, result)
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<AdminPrincipal>,
    Path((slug, raw_id)): Path<(String, String)>,
    jar: CookieJar,
) -> AppResult<Response> {
    let view = resolve_view(&state, &slug)?;
    let id = parse_id(&raw_id)?;
    view.delete(id).await?;
    info!(admin_id = principal.user_id, model = view.slug(), id, "record deleted from admin");

    let target = format!("/admin/{}", view.slug());
    Ok((flash::set(jar, Flash::Deleted), Redirect::to(&target)).into_response())
}

/// Success redirects to the list; a validation failure re-renders the
/// shared form with the submitted values.
fn finish_write(
    state: &AppState,
    view: &dyn AdminView,
    mode: &FormMode,
    form: &FormValues,
    jar: CookieJar,
    result: Result<(), DomainError>,
) -> AppResult<Response> {
    match result {
        Ok(()) => {
            let target = format!("/admin/{}", view.slug());
            Ok((flash::set(jar, Flash::Saved), Redirect::to(&target)).into_response())
        }
        Err(err) => match FieldErrors::from_domain(&err) {
            Some(errors) => Ok(render_form(state, view, mode, form, &errors).into_response()),
            None => Err(err.into()),
        },
    }
}

fn render_form(
    state: &AppState,
    view: &dyn AdminView,
    mode: &FormMode,
    values: &FormValues,
    errors: &FieldErrors,
) -> Html<String> {
    form_page(
        view,
        mode,
        values,
        errors,
        state.site.rich_text_editor_url.as_deref(),
    )
}
