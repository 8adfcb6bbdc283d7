//! Publish envelopes: the message shape handed to the pub/sub broker.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Subject line attached to every published notification.
pub const EVENT_SUBJECT: &str = "Stripe Event Notification";

/// Name of the pub/sub topic an envelope is published to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicName(String);

impl TopicName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One message bound for a topic: the webhook body percent-encoded, plus a
/// fixed human-readable subject. Built once per admitted request and owned
/// by that request's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishEnvelope {
    pub topic: TopicName,
    pub message: String,
    pub subject: String,
}

impl PublishEnvelope {
    /// Builds an envelope from a raw webhook body. Total for any byte input;
    /// the body is treated as opaque text, never validated.
    pub fn new(topic: TopicName, raw_body: &[u8]) -> Self {
        let message = urlencoding::encode(&String::from_utf8_lossy(raw_body)).into_owned();
        Self {
            topic,
            message,
            subject: EVENT_SUBJECT.to_string(),
        }
    }

    /// Form-encoded body of the broker publish call.
    pub fn form_body(&self) -> String {
        format!(
            "Action=Publish&TopicArn={}&Message={}&Subject={}",
            urlencoding::encode(self.topic.as_str()),
            self.message,
            self.subject
        )
    }
}

/// Broker acknowledgement for an accepted publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub message_id: String,
    pub published_at: String,
}

impl PublishReceipt {
    /// Assigns a fresh message id stamped with the current time.
    pub fn assign() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            message_id: Uuid::new_v4().to_string(),
            published_at: now
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| now.unix_timestamp().to_string()),
        }
    }
}
