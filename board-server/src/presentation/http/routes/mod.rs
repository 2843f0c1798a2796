use axum::Router;
use axum::routing::get;

use super::handlers::health::healthz;
use crate::presentation::AppState;

pub(crate) mod posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/posts", posts::router())
}
