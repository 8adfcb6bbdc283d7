use axum::{
    body::Body,
    http::{HeaderValue, Request, header::HeaderName},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Correlation id assigned to each inbound request.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Stamps a fresh request id on the request extensions and echoes it back in
/// the `x-request-id` response header.
pub async fn with_request_id(mut req: Request<Body>, next: Next) -> Response {
    let rid = RequestId(Uuid::new_v4().to_string());
    req.extensions_mut().insert(rid.clone());

    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&rid.0) {
        res.headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    res
}
