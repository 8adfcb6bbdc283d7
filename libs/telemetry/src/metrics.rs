use metrics::Label;

use crate::context::TelemetryLabels;

/// Increments a counter on the installed metrics recorder. Without a
/// recorder the call is a no-op.
pub fn record_counter(name: &'static str, value: u64, labels: &TelemetryLabels) {
    let tags: Vec<Label> = labels
        .tags()
        .into_iter()
        .map(|(key, value)| Label::new(key, value))
        .collect();
    metrics::counter!(name, tags).increment(value);
}
