use std::net::IpAddr;

use sen_core::TopicName;
use sen_telemetry::{TelemetryLabels, record_counter};
use tracing::Span;

const INGRESS_COUNTER: &str = "events_ingressed";
const DENIED_COUNTER: &str = "perimeter_denied";
const PUBLISH_FAILED_COUNTER: &str = "publish_failed";
const INGRESS_SPAN_NAME: &str = "ingress.handle";

/// Counts an event accepted and published.
pub fn record_ingress(topic: &TopicName) {
    record_counter(INGRESS_COUNTER, 1, &TelemetryLabels::for_topic(topic.as_str()));
}

/// Counts a caller turned away at the perimeter.
pub fn record_denied(source: Option<IpAddr>) {
    let labels = TelemetryLabels::for_source(
        source
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".into()),
    );
    record_counter(DENIED_COUNTER, 1, &labels);
}

/// Counts a publish the broker refused or could not take.
pub fn record_publish_failure(topic: &TopicName) {
    record_counter(
        PUBLISH_FAILED_COUNTER,
        1,
        &TelemetryLabels::for_topic(topic.as_str()),
    );
}

pub fn start_ingress_span(topic: &TopicName, request_id: Option<&str>) -> Span {
    tracing::info_span!(
        INGRESS_SPAN_NAME,
        topic = %topic,
        request_id = %request_id.unwrap_or("n/a")
    )
}
