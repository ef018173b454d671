mod cors;
mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::post,
    Router,
};

use crate::AppState;

pub use handlers::{ask, fallback_response, not_found};
pub use models::{AskRequest, AskResponse, ErrorResponse};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ask", post(ask).layer(DefaultBodyLimit::disable()))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(cors::allow_any_origin))
        .layer(middleware::from_fn(log_http_request))
}

async fn log_http_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        "http request"
    );
    response
}
