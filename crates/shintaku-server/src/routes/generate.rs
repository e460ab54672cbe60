//! Generate Routes - oracle message generation
//!
//! Single public POST endpoint. The handler gates every request
//! through origin checking, rate limiting and input validation before
//! anything reaches the upstream model, and collapses all upstream
//! failures into generic 500 bodies so internal detail never leaks.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use shintaku::{build_prompt, interpret};

use crate::models::{ErrorBody, GenerateMessageBody, GenerateMessageResponse};
use crate::ratelimit::RateDecision;
use crate::security::client_ip;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/generate-message",
        post(generate_message)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

/// Generate an oracle message for a drawn spread
///
/// POST /api/generate-message
#[utoipa::path(
    post,
    path = "/api/generate-message",
    request_body = GenerateMessageBody,
    responses(
        (status = 200, description = "One generated message per card", body = GenerateMessageResponse),
        (status = 400, description = "Invalid request body", body = ErrorBody),
        (status = 403, description = "Origin not allowed", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded", body = ErrorBody),
        (status = 500, description = "Generation failed", body = ErrorBody)
    ),
    tag = "Generate"
)]
pub async fn generate_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<GenerateMessageBody>,
) -> Response {
    // Browsers always send Origin on cross-site POSTs; an absent
    // header is as untrusted as a wrong one.
    let origin = headers.get("origin").and_then(|v| v.to_str().ok());
    let origin_ok = match origin {
        Some(origin) => state.config.origin_allowed(origin),
        None => state.config.dev_mode,
    };
    if !origin_ok {
        tracing::warn!(origin = origin.unwrap_or("<none>"), "rejected request origin");
        return error_response(StatusCode::FORBIDDEN, "Forbidden: Invalid origin");
    }

    let ip = client_ip(&headers);
    if let RateDecision::Denied { retry_after_secs } =
        state.rate_limiter.check(&ip, body.fingerprint.as_deref())
    {
        tracing::warn!(ip, retry_after_secs, "rate limited");
        return rate_limited_response(retry_after_secs);
    }

    let reading = match body.validate() {
        Ok(reading) => reading,
        Err(message) => {
            tracing::info!(message, "rejected invalid request body");
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    let Some(generator) = state.generator.as_ref() else {
        tracing::error!("GEMINI_API_KEY is not configured");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Service temporarily unavailable",
        );
    };

    let prompt = match build_prompt(
        &reading.cards,
        reading.level,
        reading.language,
        reading.mode,
    ) {
        Ok(prompt) => prompt,
        Err(err) => {
            tracing::error!(kind = %err.kind, "prompt construction failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate message",
            );
        }
    };

    let raw = match generator.generate(&prompt, reading.mode).await {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(kind = %err.kind, detail = err.detail, "upstream generation failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate message",
            );
        }
    };

    let messages = match interpret(&raw, reading.mode) {
        Ok(messages) => messages,
        Err(err) => {
            tracing::error!(kind = %err.kind, detail = err.detail, "upstream response unusable");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate message",
            );
        }
    };

    tracing::info!(mode = %reading.mode, cards = reading.cards.len(), "reading generated");
    (StatusCode::OK, Json(GenerateMessageResponse::new(messages))).into_response()
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

fn rate_limited_response(retry_after_secs: u64) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorBody::rate_limited(retry_after_secs)),
    )
        .into_response();
    if let Ok(value) = retry_after_secs.to_string().parse() {
        response.headers_mut().insert("retry-after", value);
    }
    response
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use shintaku::{DrawMode, ErrorKind, OracleError};
    use tower::ServiceExt;

    use super::*;
    use crate::config::GatewayConfig;
    use crate::ratelimit::RateLimiter;
    use crate::services::TextGenerator;

    struct StaticGenerator {
        text: Result<String, ErrorKind>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl StaticGenerator {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                text: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn failing(kind: ErrorKind) -> Arc<Self> {
            Arc::new(Self {
                text: Err(kind),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(&self, prompt: &str, _mode: DrawMode) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.text
                .clone()
                .map_err(|kind| OracleError::new(kind, "scripted failure"))
        }
    }

    fn test_state(generator: Option<Arc<StaticGenerator>>) -> AppState {
        let config = Arc::new(GatewayConfig::default());
        AppState {
            rate_limiter: Arc::new(RateLimiter::new(&config)),
            config,
            generator: generator.map(|g| g as Arc<dyn TextGenerator>),
        }
    }

    fn post_body(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate-message")
            .header("content-type", "application/json")
            .header("origin", "http://localhost:5173")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn single_body(name: &str) -> Value {
        json!({
            "cards": [{
                "name": name,
                "description": "Goddess of love and beauty",
                "message": "Love flows toward you"
            }],
            "language": "en",
            "readingLevel": "normal",
            "mode": "single"
        })
    }

    async fn json_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let app = crate::app(test_state(Some(StaticGenerator::ok("hi"))));
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/generate-message")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, body) = json_of(response).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn preflight_answers_200_with_cors_grant() {
        let app = crate::app(test_state(Some(StaticGenerator::ok("hi"))));
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/generate-message")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get("access-control-allow-methods").unwrap(),
            "POST, OPTIONS"
        );
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    }

    #[tokio::test]
    async fn unknown_origin_is_forbidden() {
        let generator = StaticGenerator::ok("hi");
        let app = crate::app(test_state(Some(generator.clone())));
        let mut request = post_body(single_body("Aphrodite"));
        request
            .headers_mut()
            .insert("origin", "https://evil.example.com".parse().unwrap());
        let response = app.oneshot(request).await.unwrap();
        let (status, body) = json_of(response).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden: Invalid origin");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_origin_is_forbidden_outside_dev_mode() {
        let generator = StaticGenerator::ok("hi");
        let app = crate::app(test_state(Some(generator.clone())));
        let mut request = post_body(single_body("Aphrodite"));
        request.headers_mut().remove("origin");
        let response = app.oneshot(request).await.unwrap();
        let (status, body) = json_of(response).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden: Invalid origin");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_origin_is_allowed_in_dev_mode() {
        let config = Arc::new(GatewayConfig {
            dev_mode: true,
            ..GatewayConfig::default()
        });
        let state = AppState {
            rate_limiter: Arc::new(RateLimiter::new(&config)),
            config,
            generator: Some(StaticGenerator::ok("hi") as Arc<dyn TextGenerator>),
        };
        let app = crate::app(state);
        let mut request = post_body(single_body("Aphrodite"));
        request.headers_mut().remove("origin");
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malicious_card_data_never_reaches_the_generator() {
        let generator = StaticGenerator::ok("hi");
        let app = crate::app(test_state(Some(generator.clone())));
        let mut body = single_body("Aphrodite");
        body["cards"][0]["description"] = json!("<script>alert(1)</script>");
        let response = app.oneshot(post_body(body)).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid or malicious card data");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_card_fields_are_rejected() {
        let app = crate::app(test_state(Some(StaticGenerator::ok("hi"))));
        let mut body = single_body("Aphrodite");
        body["cards"][0]["description"] = json!("");
        body["cards"][0]["message"] = json!("");
        let response = app.oneshot(post_body(body)).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid or malicious card data");
    }

    #[tokio::test]
    async fn single_mode_with_two_cards_is_rejected() {
        let app = crate::app(test_state(Some(StaticGenerator::ok("hi"))));
        let body = json!({
            "mode": "single",
            "cards": [
                {"name": "a", "description": "b", "message": "c"},
                {"name": "d", "description": "e", "message": "f"}
            ]
        });
        let response = app.oneshot(post_body(body)).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Single mode requires exactly 1 card");
    }

    #[tokio::test]
    async fn three_mode_with_wrong_card_count_is_rejected() {
        let app = crate::app(test_state(Some(StaticGenerator::ok("hi"))));
        let body = json!({
            "mode": "three",
            "cards": [{"name": "a", "description": "b", "message": "c"}]
        });
        let response = app.oneshot(post_body(body)).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Three card mode requires exactly 3 cards");
    }

    #[tokio::test]
    async fn missing_credential_is_a_generic_500() {
        let app = crate::app(test_state(None));
        let response = app.oneshot(post_body(single_body("Aphrodite"))).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Service temporarily unavailable");
    }

    #[tokio::test]
    async fn single_reading_returns_one_message_in_the_array() {
        let generator = StaticGenerator::ok("The goddess smiles upon you.");
        let app = crate::app(test_state(Some(generator.clone())));
        let response = app.oneshot(post_body(single_body("Aphrodite"))).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["messages"],
            json!(["The goddess smiles upon you."])
        );

        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Aphrodite"));
        assert!(prompt.contains("Love flows toward you"));
    }

    #[tokio::test]
    async fn three_reading_returns_messages_in_position_order() {
        let raw = json!({
            "past": "You carried much.",
            "present": "You are ready.",
            "future": "A door opens."
        });
        let generator = StaticGenerator::ok(&raw.to_string());
        let app = crate::app(test_state(Some(generator)));
        let body = json!({
            "mode": "three",
            "cards": [
                {"name": "Izanami", "description": "d1", "message": "m1"},
                {"name": "Athena", "description": "d2", "message": "m2"},
                {"name": "Brigid", "description": "d3", "message": "m3"}
            ]
        });
        let response = app.oneshot(post_body(body)).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["messages"],
            json!(["You carried much.", "You are ready.", "A door opens."])
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_a_generic_500() {
        let app = crate::app(test_state(Some(StaticGenerator::failing(
            ErrorKind::ServerError,
        ))));
        let response = app.oneshot(post_body(single_body("Aphrodite"))).await.unwrap();
        let (status, json) = json_of(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to generate message");
    }

    #[tokio::test]
    async fn exhausted_budget_returns_429_with_retry_hint() {
        let config = Arc::new(GatewayConfig {
            rate_limit_max_requests: 1,
            ..GatewayConfig::default()
        });
        let state = AppState {
            rate_limiter: Arc::new(RateLimiter::new(&config)),
            config,
            generator: Some(StaticGenerator::ok("hi") as Arc<dyn TextGenerator>),
        };
        let app = crate::app(state);

        let first = app
            .clone()
            .oneshot(post_body(single_body("Aphrodite")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(post_body(single_body("Aphrodite"))).await.unwrap();
        assert!(second.headers().get("retry-after").is_some());
        let (status, json) = json_of(second).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"], "Too many requests. Please try again later.");
        assert!(json["retryAfter"].as_u64().unwrap() > 0);
    }
}
