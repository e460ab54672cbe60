//! Security Headers and CORS
//!
//! Every response carries the browser hardening headers, and CORS is
//! decided per request against the configured origin allowlist. In dev
//! mode any origin is accepted without credentials; in production only
//! allowlisted origins get a credentialed grant.

use axum::extract::{Request, State};
use axum::http::header::{HeaderName, HeaderValue, ORIGIN};
use axum::middleware::Next;
use axum::response::Response;

use crate::AppState;

const CORS_METHODS: &str = "POST, OPTIONS";
const CORS_HEADERS: &str = "Content-Type";
const CORS_MAX_AGE: &str = "86400";

/// Middleware that stamps hardening and CORS headers on every response.
pub async fn security_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    insert_static(headers, "x-content-type-options", "nosniff");
    insert_static(headers, "x-frame-options", "DENY");
    insert_static(headers, "x-xss-protection", "1; mode=block");
    insert_static(
        headers,
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    );
    insert_static(headers, "referrer-policy", "strict-origin-when-cross-origin");

    if state.config.dev_mode {
        insert_static(headers, "access-control-allow-origin", "*");
    } else if let Some(origin) = origin.filter(|o| state.config.origin_allowed(o)) {
        if let Ok(value) = HeaderValue::from_str(&origin) {
            headers.insert(HeaderName::from_static("access-control-allow-origin"), value);
            insert_static(headers, "access-control-allow-credentials", "true");
        }
    }
    insert_static(headers, "access-control-allow-methods", CORS_METHODS);
    insert_static(headers, "access-control-allow-headers", CORS_HEADERS);
    insert_static(headers, "access-control-max-age", CORS_MAX_AGE);

    response
}

fn insert_static(headers: &mut axum::http::HeaderMap, name: &'static str, value: &'static str) {
    headers.insert(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    );
}

/// Best-effort client address for rate limiting.
///
/// Proxy headers are consulted first; behind the expected deployment
/// every request carries `x-forwarded-for`. The literal "unknown"
/// bucket catches direct hits without one.
pub fn client_ip(headers: &axum::http::HeaderMap) -> String {
    if let Some(ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if !ip.trim().is_empty() {
            return ip.trim().to_string();
        }
    }
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;

    use super::*;

    #[test]
    fn real_ip_header_wins_over_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "10.0.0.1".parse().unwrap());
        headers.insert("x-forwarded-for", "10.0.0.2, 10.0.0.3".parse().unwrap());
        assert_eq!(client_ip(&headers), "10.0.0.1");
    }

    #[test]
    fn forwarded_for_uses_the_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.2, 10.0.0.3".parse().unwrap());
        assert_eq!(client_ip(&headers), "10.0.0.2");
    }

    #[test]
    fn missing_headers_fall_back_to_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }
}
