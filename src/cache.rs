//! HTTP cache headers: Cache-Control and ETag on GET/HEAD, with
//! `If-None-Match` revalidation answered by `304 Not Modified`.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};

#[derive(Clone, Debug)]
pub struct CachePolicy {
    /// `max-age` in seconds.
    pub max_age: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy { max_age: 60 }
    }
}

impl CachePolicy {
    pub fn cache_control(&self) -> String {
        format!("private, max-age={}, must-revalidate", self.max_age)
    }
}

/// Strong validator for a response body.
pub fn etag_for(body: &[u8]) -> String {
    format!("\"{:x}\"", Sha256::digest(body))
}

/// `If-None-Match` matches when it is `*` or lists `etag` (weak comparison).
pub fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let strip = |t: &str| t.trim().trim_start_matches("W/").to_string();
    let wanted = strip(etag);
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|candidate| candidate.trim() == "*" || strip(candidate) == wanted)
}

/// Middleware; install with `axum::middleware::from_fn_with_state(policy, cache_headers)`.
pub async fn cache_headers(State(policy): State<CachePolicy>, request: Request, next: Next) -> Response {
    let cacheable_method = matches!(*request.method(), Method::GET | Method::HEAD);
    let request_headers = request.headers().clone();
    let response = next.run(request).await;

    if !cacheable_method {
        let mut response = response;
        response
            .headers_mut()
            .entry(header::CACHE_CONTROL)
            .or_insert(HeaderValue::from_static("no-store"));
        return response;
    }
    if !response.status().is_success() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let etag = etag_for(&bytes);

    let headers = &mut parts.headers;
    if let Ok(v) = HeaderValue::from_str(&policy.cache_control()) {
        headers.insert(header::CACHE_CONTROL, v);
    }
    if let Ok(v) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, v);
    }
    headers.insert(header::VARY, HeaderValue::from_static("Accept"));

    if if_none_match_matches(&request_headers, &etag) {
        parts.status = StatusCode::NOT_MODIFIED;
        parts.headers.remove(header::CONTENT_TYPE);
        parts.headers.remove(header::CONTENT_LENGTH);
        return Response::from_parts(parts, Body::empty());
    }
    Response::from_parts(parts, Body::from(bytes))
}
