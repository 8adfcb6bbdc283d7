//! Shared types for the Stripe event notification service.

pub mod envelope;
pub mod error;
pub mod topics;

pub use envelope::{EVENT_SUBJECT, PublishEnvelope, PublishReceipt, TopicName};
pub use error::{ERROR_MARKER, PublishError, strip_error_marker};
pub use topics::{topic_subject, valid_topic};
