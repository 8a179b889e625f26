use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use super::handlers::{admin, auth, blog, guestbook, health};
use super::middleware::auth::admin_auth_middleware;
use crate::presentation::AppState;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    public_router().merge(admin_router(state))
}

fn public_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(guestbook::show_guestbook).post(guestbook::submit_message),
        )
        .route("/blogDisplay", get(blog::blog_display))
        .route("/blogContent/{id}", get(blog::blog_content))
        .route("/healthz", get(health::healthz))
}

fn admin_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/admin/login", get(auth::login_form).post(auth::login))
        .route("/admin/logout", post(auth::logout));

    let protected = Router::new()
        .route("/admin", get(admin::index))
        .route("/admin/{model}", get(admin::list))
        .route(
            "/admin/{model}/new",
            get(admin::create_form).post(admin::create),
        )
        .route(
            "/admin/{model}/{id}/edit",
            get(admin::edit_form).post(admin::update),
        )
        .route("/admin/{model}/{id}/delete", post(admin::delete))
        .layer(middleware::from_fn_with_state(
            state,
            admin_auth_middleware,
        ));

    public.merge(protected)
}
