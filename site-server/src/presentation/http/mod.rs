pub(crate) mod admin;
pub(crate) mod app_error;
pub(crate) mod flash;
pub(crate) mod forms;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod routes;
pub(crate) mod views;


use axum::Router;

use super::AppState;

pub(crate) fn app_router(state: AppState) -> Router {
    routes::router(state.clone()).with_state(state)
}
