use axum::Router;

use super::AppState;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) fn routes(state: AppState) -> Router {
    routes::router().with_state(state)
}
