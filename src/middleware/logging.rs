use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Tags the request with an id (the caller's `x-request-id` when it sent one) and runs the
/// rest of the stack inside a span carrying it, so handler and error logs share the id.
pub async fn logging_middleware(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let incoming = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .filter(|value| !value.is_empty())
        .cloned();
    let header_value = match incoming {
        Some(value) => Some(value),
        None => HeaderValue::from_str(&Uuid::new_v4().to_string()).ok(),
    };
    let request_id = header_value
        .as_ref()
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    if let Some(value) = header_value.clone() {
        request.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let span = tracing::info_span!("request", request_id = %request_id);

    let mut response = async {
        tracing::info!(
            method = %method,
            uri = %uri,
            version = ?version,
            "Request started"
        );

        let response = next.run(request).await;

        tracing::info!(
            method = %method,
            uri = %uri,
            status = %response.status(),
            duration_ms = %start.elapsed().as_millis(),
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
