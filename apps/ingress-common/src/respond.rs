use axum::{Json, http::StatusCode, response::IntoResponse};
use sen_core::PublishError;
use serde_json::json;

/// 200 acknowledgement for an accepted event.
pub fn event_received() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "event received" })))
}

/// 400 mapping for a failed publish. Broker reasons may carry the legacy
/// `[Error]` marker; the embedded text is marker-free.
pub fn broker_error(err: &PublishError) -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "state": "error", "message": err.wire_message() })),
    )
}
