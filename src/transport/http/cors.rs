//! Cross-origin access control.
//!
//! Two pieces: [`cors_gate`] refuses requests that declare an origin outside the
//! allow-list before they reach any handler, and [`cors_layer`] emits the
//! `Access-Control-*` headers (and answers preflights) for the ones that pass.

use crate::transport::http::types::MessageResponse;
use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Browser origins allowed to call the API.
pub const ACCEPTED_ORIGINS: &[&str] = &[
    "http://127.0.0.1:5500",
    "http://localhost:5500",
    "https://movies.com",
    "https://midu.dev",
];

pub const CORS_REJECTED: &str = "Not allowed by CORS";

/// Requests without an origin (same-origin, curl, server-to-server) are always allowed.
/// Otherwise the origin must match an allow-list entry exactly.
pub fn is_origin_allowed(origin: Option<&str>) -> bool {
    match origin {
        None => true,
        Some(origin) => ACCEPTED_ORIGINS.contains(&origin),
    }
}

fn header_allowed(origin: Option<&HeaderValue>) -> bool {
    match origin {
        None => true,
        // A non-ASCII origin can never match the list.
        Some(v) => v.to_str().map(|o| is_origin_allowed(Some(o))).unwrap_or(false),
    }
}

/// Middleware rejecting disallowed cross-origin requests with 403.
pub async fn cors_gate(request: Request, next: Next) -> Response {
    let origin = request.headers().get(header::ORIGIN);
    if !header_allowed(origin) {
        tracing::warn!(
            origin = ?origin,
            method = %request.method(),
            path = %request.uri().path(),
            "rejected cross-origin request"
        );
        return (StatusCode::FORBIDDEN, Json(MessageResponse::new(CORS_REJECTED))).into_response();
    }
    next.run(request).await
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| header_allowed(Some(origin)),
        ))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}
