use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::controllers;
use crate::error::{layer_failures, panic_response};
use crate::{auth, AppState};

/// Dimensione massima del body di una richiesta (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;

/// POST /v1/messages e /ping sono pubblici, il resto richiede la basic auth.
/// Allo scadere di `request_timeout` l'handler viene abbandonato. Timeout,
/// body troppo grande e panic rispondono 500 con il body `{ code, message }`.
pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let basic_auth = middleware::from_fn(auth::require_basic_auth);

    Router::new()
        .route("/ping", get(controllers::ping))
        .route(
            "/v1/messages",
            post(controllers::create).merge(get(controllers::list).route_layer(basic_auth.clone())),
        )
        .route(
            "/v1/messages/{id}",
            get(controllers::get)
                .put(controllers::update)
                .route_layer(basic_auth),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::map_response(layer_failures))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(Extension(state))
}
