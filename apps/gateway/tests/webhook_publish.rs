use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sen_bus::{Fanout, InMemoryFanout, TopicRegistry};
use sen_core::{PublishEnvelope, PublishError, PublishReceipt, TopicName};
use sen_gateway::http::{AppState, build_router};
use sen_policy::{IpAllowlist, PolicyDocument};
use serde_json::{Value, json};
use tower::ServiceExt;

const TOPIC: &str = "stripe-notification-topic";
const SUBSCRIBER: &str = "ops@example.com";

fn topic() -> TopicName {
    TopicName::new(TOPIC)
}

fn stripe_policy() -> Arc<PolicyDocument> {
    let allowlist = IpAllowlist::parse(["3.18.12.63"]).unwrap();
    Arc::new(PolicyDocument::restrict_to(allowlist))
}

fn memory_fanout(subscribers: &[&str]) -> Arc<InMemoryFanout> {
    let mut registry = TopicRegistry::default();
    for address in subscribers {
        registry.register(topic(), *address);
    }
    Arc::new(InMemoryFanout::new(registry))
}

fn router_with(fanout: Arc<dyn Fanout>) -> Router {
    let state = AppState {
        fanout,
        topic: topic(),
    };
    build_router(state, stripe_policy(), false)
}

fn event_request(source: [u8; 4], body: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri("/stripeevents")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((source, 443))));
    req
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn allowlisted_event_is_published_and_acknowledged() {
    let fanout = memory_fanout(&[SUBSCRIBER]);
    let app = router_with(fanout.clone());

    let response = app
        .oneshot(event_request([3, 18, 12, 63], r#"{"id":"evt_1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_json(response).await, json!({ "status": "event received" }));

    let delivered = fanout.deliveries(SUBSCRIBER).await;
    assert_eq!(delivered.len(), 1);
    let decoded = urlencoding::decode(&delivered[0].message).expect("decode message");
    assert_eq!(decoded, r#"{"id":"evt_1"}"#);
}

#[tokio::test]
async fn unlisted_caller_is_denied_before_the_pipeline_runs() {
    let fanout = memory_fanout(&[SUBSCRIBER]);
    let app = router_with(fanout.clone());

    let response = app
        .oneshot(event_request([9, 9, 9, 9], r#"{"id":"evt_1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(fanout.publish_attempts().await, 0);
    assert!(fanout.deliveries(SUBSCRIBER).await.is_empty());
}

#[tokio::test]
async fn broker_rejection_maps_to_bad_request() {
    struct RejectingFanout;

    #[async_trait::async_trait]
    impl Fanout for RejectingFanout {
        async fn publish(
            &self,
            _envelope: &PublishEnvelope,
        ) -> Result<PublishReceipt, PublishError> {
            Err(PublishError::rejected("[Error] invalid topic arn"))
        }
    }

    let app = router_with(Arc::new(RejectingFanout));
    let response = app
        .oneshot(event_request([3, 18, 12, 63], r#"{"id":"evt_1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "state": "error", "message": "invalid topic arn" })
    );
}

#[tokio::test]
async fn publish_fans_out_to_every_subscriber() {
    let fanout = memory_fanout(&[SUBSCRIBER, "billing@example.com"]);
    let app = router_with(fanout.clone());

    let response = app
        .oneshot(event_request([3, 18, 12, 63], r#"{"id":"evt_2"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(fanout.deliveries(SUBSCRIBER).await.len(), 1);
    assert_eq!(fanout.deliveries("billing@example.com").await.len(), 1);
}

#[tokio::test]
async fn empty_body_is_still_accepted() {
    let fanout = memory_fanout(&[SUBSCRIBER]);
    let app = router_with(fanout.clone());

    let response = app
        .oneshot(event_request([3, 18, 12, 63], ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let delivered = fanout.deliveries(SUBSCRIBER).await;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].message, "");
}
