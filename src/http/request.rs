//! Request ID middleware.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client did not send one
//! - Echo the ID on the response so callers can correlate
//!
//! # Design Decisions
//! - Request ID added as early as possible so it appears in all spans

use axum::body::Body;
use axum::http::{header::HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Middleware: ensure every request and its response carry `x-request-id`.
pub async fn assign_request_id(mut request: Request<Body>, next: Next) -> Response {
    let id = request
        .headers()
        .get(&X_REQUEST_ID)
        .cloned()
        .unwrap_or_else(|| {
            // UUIDs are always valid header values.
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("invalid"))
        });

    request.headers_mut().insert(&X_REQUEST_ID, id.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(&X_REQUEST_ID, id);
    response
}
