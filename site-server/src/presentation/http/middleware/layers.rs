use axum::Router;
use axum::http::{HeaderName, HeaderValue, header};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::settings::Settings;

pub(crate) fn apply_trace(router: Router) -> Router {
    router.layer(TraceLayer::new_for_http())
}

pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
}

/// Disables client caching, for development.
pub(crate) fn apply_no_cache(router: Router, enabled: bool) -> Router {
    if !enabled {
        return router;
    }
    no_cache_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}

fn no_cache_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate, public, max-age=0"),
        ),
        (header::EXPIRES, HeaderValue::from_static("0")),
        (header::PRAGMA, HeaderValue::from_static("no-cache")),
    ]
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    use super::apply_no_cache;

    fn app(no_cache: bool) -> Router {
        apply_no_cache(Router::new().route("/", get(|| async { "ok" })), no_cache)
    }

    #[tokio::test]
    async fn no_cache_headers_are_opt_in() {
        let response = app(true)
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::PRAGMA).and_then(|v| v.to_str().ok()),
            Some("no-cache")
        );

        let response = app(false)
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }
}
