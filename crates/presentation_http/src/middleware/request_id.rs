//! Request ID middleware for HTTP request correlation
//!
//! Reuses a well-formed client-supplied `X-Request-Id` or generates a UUID v7,
//! records it on the request span, and echoes it on the response.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use axum::{body::Body, extract::Request, http::header::HeaderValue, response::Response};
use tower::{Layer, Service};
use tracing::{Instrument, info};
use uuid::Uuid;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Longest client-supplied id that is accepted as-is
const MAX_CLIENT_ID_LEN: usize = 64;

/// Layer that adds request ID handling to HTTP services
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service that extracts or generates a request ID for each request
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

/// Accept printable ASCII ids of reasonable length
fn client_id(value: &HeaderValue) -> Option<String> {
    let id = value.to_str().ok()?.trim();
    let valid = !id.is_empty()
        && id.len() <= MAX_CLIENT_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic());
    valid.then(|| id.to_string())
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(client_id)
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        request
            .extensions_mut()
            .insert(RequestId(request_id.clone()));

        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
        );

        let mut inner = self.inner.clone();
        let started = Instant::now();

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                info!(
                    status = response.status().as_u16(),
                    latency_ms = started.elapsed().as_millis(),
                    "Request completed"
                );

                if let Ok(value) = HeaderValue::from_str(&request_id) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Request ID taken from the client or generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Router, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn echo(Extension(id): Extension<RequestId>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(echo))
            .layer(RequestIdLayer::new())
    }

    fn get_with(header: Option<&str>) -> Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(REQUEST_ID_HEADER, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn generates_uuid_when_missing() {
        let response = app().oneshot(get_with(None)).await.unwrap();
        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        let uuid = Uuid::parse_str(id).unwrap();
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[tokio::test]
    async fn reuses_client_id() {
        let response = app().oneshot(get_with(Some("batch-42"))).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "batch-42");
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"batch-42");
    }

    #[tokio::test]
    async fn replaces_oversized_client_id() {
        let long = "x".repeat(MAX_CLIENT_ID_LEN + 1);
        let response = app().oneshot(get_with(Some(&long))).await.unwrap();
        assert_ne!(response.headers()[REQUEST_ID_HEADER], long.as_str());
    }

    #[test]
    fn rejects_blank_and_spaced_ids() {
        assert!(client_id(&HeaderValue::from_static("   ")).is_none());
        assert!(client_id(&HeaderValue::from_static("a b")).is_none());
        assert_eq!(
            client_id(&HeaderValue::from_static("abc-123")),
            Some("abc-123".to_string())
        );
    }
}
