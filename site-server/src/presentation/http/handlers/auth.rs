use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::user::LoginRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::auth::SESSION_COOKIE;
use crate::presentation::http::views::admin::login_page;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct LoginDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 20))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

pub(crate) async fn login_form() -> Html<String> {
    login_page("", None)
}

pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(dto): Form<LoginDto>,
) -> AppResult<Response> {
    if dto.validate().is_err() {
        return Ok(login_page(&dto.username, Some("Username and password are required.")).into_response());
    }

    let req = LoginRequest {
        username: dto.username.clone(),
        password: dto.password,
    };

    match state.auth_service.login(req).await {
        Ok(result) => {
            let cookie = Cookie::build((SESSION_COOKIE, result.access_token))
                .path("/admin")
                .http_only(true)
                .same_site(SameSite::Lax);
            Ok((jar.add(cookie), Redirect::to("/admin")).into_response())
        }
        Err(DomainError::InvalidCredentials | DomainError::Validation { .. }) => Ok((
            StatusCode::UNAUTHORIZED,
            login_page(&dto.username, Some("Invalid username or password.")),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn logout(jar: CookieJar) -> Response {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/admin"));
    (jar, Redirect::to("/admin/login")).into_response()
}
