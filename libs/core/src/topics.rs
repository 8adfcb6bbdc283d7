//! Subject naming for the notification bus.

use crate::envelope::TopicName;

/// Prefix under which notification topics live on the bus.
pub const NOTIFY_SUBJECT_PREFIX: &str = "sen.notify";

/// Bus subject carrying publishes for a topic.
pub fn topic_subject(topic: &TopicName) -> String {
    format!("{NOTIFY_SUBJECT_PREFIX}.{topic}")
}

/// Whether a topic name is usable as a subject token. Empty names,
/// whitespace, and subject metacharacters are refused by the broker, so a
/// publish against them surfaces as a rejection rather than a silent drop.
pub fn valid_topic(topic: &TopicName) -> bool {
    let name = topic.as_str();
    !name.is_empty() && !name.contains([' ', '\t', '.', '*', '>'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_is_prefixed() {
        let topic = TopicName::new("stripe-notification-topic");
        assert_eq!(topic_subject(&topic), "sen.notify.stripe-notification-topic");
    }

    #[test]
    fn rejects_metacharacters_and_empty_names() {
        assert!(valid_topic(&TopicName::new("stripe-notification-topic")));
        assert!(!valid_topic(&TopicName::new("")));
        assert!(!valid_topic(&TopicName::new("bad topic")));
        assert!(!valid_topic(&TopicName::new("bad.topic")));
        assert!(!valid_topic(&TopicName::new("bad>")));
    }
}
