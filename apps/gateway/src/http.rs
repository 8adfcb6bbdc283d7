use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Extension, State},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
};
use sen_bus::Fanout;
use sen_core::{PublishEnvelope, TopicName};
use sen_ingress_common::{
    PerimeterConfig, RequestId, broker_error, enforce_perimeter, event_received, record_ingress,
    record_publish_failure, start_ingress_span, with_request_id,
};
use sen_policy::PolicyDocument;
use tracing::Instrument;

/// Shared request-handling state: the fan-out seam and the destination topic.
#[derive(Clone)]
pub struct AppState {
    pub fanout: Arc<dyn Fanout>,
    pub topic: TopicName,
}

/// Builds the gateway router: the single webhook route behind the perimeter
/// and request-id layers.
pub fn build_router(
    state: AppState,
    policy: Arc<PolicyDocument>,
    trust_forwarded_for: bool,
) -> Router {
    Router::new()
        .route("/stripeevents", post(handle_event))
        .layer(middleware::from_fn(enforce_perimeter))
        .layer(Extension(PerimeterConfig {
            policy,
            trust_forwarded_for,
        }))
        .layer(middleware::from_fn(with_request_id))
        .with_state(state)
}

/// Admitted-request pipeline: transform the raw body, publish, map the
/// outcome. One response per request, no internal retry.
pub async fn handle_event(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    body: Bytes,
) -> Response {
    let envelope = PublishEnvelope::new(state.topic.clone(), &body);
    let rid = request_id.as_ref().map(|Extension(RequestId(id))| id.as_str());
    let span = start_ingress_span(&envelope.topic, rid);

    async {
        match state.fanout.publish(&envelope).await {
            Ok(receipt) => {
                record_ingress(&envelope.topic);
                tracing::info!(message_id = %receipt.message_id, "event published");
                event_received().into_response()
            }
            Err(err) => {
                record_publish_failure(&envelope.topic);
                tracing::error!(error = %err, "publish failed");
                broker_error(&err).into_response()
            }
        }
    }
    .instrument(span)
    .await
}
