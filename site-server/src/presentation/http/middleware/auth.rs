use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;

pub(crate) const SESSION_COOKIE: &str = "admin_session";

/// Authenticated admin, available to handlers behind the gate.
#[derive(Debug, Clone)]
pub(crate) struct AdminPrincipal {
    pub(crate) user_id: i64,
    pub(crate) username: String,
}

/// Accepts the session cookie or an `Authorization: Bearer` header.
pub(crate) async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .or_else(|| {
            CookieJar::from_headers(request.headers())
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
        })
        .ok_or(AppError::Unauthorized)?;

    let claims = state
        .auth_service
        .verify_session(&token)
        .map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(AdminPrincipal {
        user_id: claims.sub,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = raw.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::bearer_token;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_parses_scheme_case_insensitively() {
        assert_eq!(bearer_token(&headers("bearer abc")).as_deref(), Some("abc"));
        assert_eq!(bearer_token(&headers("Bearer  abc ")).as_deref(), Some("abc"));
    }

    #[test]
    fn bearer_token_rejects_other_shapes() {
        assert!(bearer_token(&headers("Basic abc")).is_none());
        assert!(bearer_token(&headers("Bearer")).is_none());
        assert!(bearer_token(&headers("Bearer a b")).is_none());
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }
}
