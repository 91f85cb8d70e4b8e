//! HTTP routing and boundary-level error mapping.
//!
//! Unknown routes, wrong methods, oversized bodies and handler panics all
//! leave the service as JSON `{"error": ...}` bodies, whichever handler was
//! involved.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::errors::AppError;
use crate::handlers::{self, AppState};

/// Request bodies above this size are rejected with a JSON 413, whether or
/// not the client sent `Content-Length`.
///
/// Enforced by the JSON extractor through [`DefaultBodyLimit`], so the
/// rejection maps to [`AppError::PayloadTooLarge`] like any other body error.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/consultar_sat", post(handlers::consultar_sat))
        .route("/consultar_multiple", post(handlers::consultar_multiple))
        .route("/estadisticas", get(handlers::estadisticas))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(middleware::map_response(method_not_allowed_body))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Replaces axum's empty 405 body with the JSON error, keeping `Allow`.
async fn method_not_allowed_body(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut replaced = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        replaced.headers_mut().insert(header::ALLOW, allow);
    }
    replaced
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(format!("handler panicked: {}", detail)).into_response()
}
