use axum::{
    Router,
    http::{StatusCode, header},
    middleware::map_response,
    response::{IntoResponse, Response},
};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;

use crate::infrastructure::settings::Settings;
use crate::presentation::http::app_error::AppError;

/// Caps request body size and the number of requests processed at once across all routes.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(map_response(envelope_oversized_body))
        .layer(GlobalConcurrencyLimitLayer::new(settings.http_concurrency_limit))
}

/// `RequestBodyLimitLayer` answers a declared oversized body with plain text before
/// the router runs; rewrite that answer into the JSON error envelope.
async fn envelope_oversized_body(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json(&response) {
        return response;
    }
    AppError::PayloadTooLarge.into_response()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
