use crate::domain::error::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use super::views::error::error_page;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not found".to_string()),
                DomainError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
                }
                DomainError::Storage(_) | DomainError::Unexpected(_) => {
                    error!(error = %err, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::Unauthorized => {
                warn!("unauthenticated admin request");
                return Redirect::to("/admin/login").into_response();
            }
        };

        (status, error_page(status, &msg)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    #[test]
    fn storage_errors_are_500_without_detail() {
        let response =
            AppError::from(DomainError::Storage("disk I/O error at /var/db".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_rows_are_404() {
        let response = AppError::from(DomainError::NotFound("post id: 1".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/admin/login")
        );
    }
}
