use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Gives framework rejections (bad JSON bodies, unknown paths, method
/// mismatches) the same `{"error": ...}` body the handlers produce. Browsers
/// asking for HTML get the response untouched.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let html_client = header_contains(req.headers(), header::ACCEPT, &["text/html"]);
    let response = next.run(req).await;

    if html_client || !needs_rewrite(&response) {
        return response;
    }
    rewrite(response).await
}

fn needs_rewrite(response: &Response) -> bool {
    let status = response.status();
    (status.is_client_error() || status.is_server_error())
        && !header_contains(response.headers(), header::CONTENT_TYPE, &["json", "text/html"])
}

async fn rewrite(response: Response) -> Response {
    let (mut parts, body) = response.into_parts();
    let status = parts.status;
    let message = to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    let error = match status {
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::METHOD_NOT_ALLOWED => AppError::method_not_allowed(message),
        _ if status.is_client_error() => AppError::bad_request(message),
        _ => AppError::internal(message),
    };

    // 415 and 422 would otherwise collapse into 400.
    let mut rewritten = error.into_response();
    *rewritten.status_mut() = status;
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);
    rewritten.headers_mut().extend(parts.headers);
    rewritten
}

fn header_contains(headers: &HeaderMap, name: header::HeaderName, needles: &[&str]) -> bool {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            needles.iter().any(|needle| value.contains(needle))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        body::{self, Body},
        http::{Request, StatusCode, header},
        middleware,
        routing::get,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::json_error_middleware;

    fn app() -> Router {
        Router::new()
            .route("/text", get(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "missing field `name`") }))
            .route(
                "/json",
                get(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "as is" }))) }),
            )
            .layer(middleware::from_fn(json_error_middleware))
    }

    async fn call(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, bytes.to_vec())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn plain_text_rejection_becomes_json_with_same_status() {
        let (status, headers, bytes) = call(get_request("/text")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "missing field `name`" }));
    }

    #[tokio::test]
    async fn empty_bodies_fall_back_to_the_reason_phrase() {
        let (status, _, bytes) = call(get_request("/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Not Found");
    }

    #[tokio::test]
    async fn method_mismatch_keeps_allow_header() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/text")
            .body(Body::empty())
            .unwrap();
        let (status, headers, bytes) = call(request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(headers.contains_key(header::ALLOW));
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn json_errors_and_html_clients_pass_through() {
        let (_, _, bytes) = call(get_request("/json")).await;
        assert_eq!(&bytes[..], br#"{"error":"as is"}"#);

        let request = Request::builder()
            .uri("/text")
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .body(Body::empty())
            .unwrap();
        let (status, _, bytes) = call(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(&bytes[..], b"missing field `name`");
    }
}
