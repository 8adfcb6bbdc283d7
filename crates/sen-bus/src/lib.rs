//! Fan-out seam for the notification gateway: a `Fanout` trait with a NATS
//! implementation for production and an in-memory topic registry for tests
//! and broker-less operation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sen_core::{PublishEnvelope, PublishError, PublishReceipt, TopicName, topic_subject, valid_topic};
use tokio::sync::Mutex;

#[async_trait]
pub trait Fanout: Send + Sync {
    /// Hands one envelope to the broker for delivery to every subscriber of
    /// its topic. One logical operation: the broker accepts or refuses the
    /// message; per-subscriber confirmation is never awaited.
    async fn publish(&self, envelope: &PublishEnvelope) -> Result<PublishReceipt, PublishError>;
}

/// Production fan-out: publishes the envelope's form body to the topic
/// subject and leaves delivery to the broker's subscribers.
pub struct NatsFanout {
    client: async_nats::Client,
}

impl NatsFanout {
    pub fn new(client: async_nats::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fanout for NatsFanout {
    async fn publish(&self, envelope: &PublishEnvelope) -> Result<PublishReceipt, PublishError> {
        if !valid_topic(&envelope.topic) {
            return Err(PublishError::rejected(format!(
                "invalid topic `{}`",
                envelope.topic
            )));
        }
        let subject = topic_subject(&envelope.topic);
        self.client
            .publish(subject, envelope.form_body().into_bytes().into())
            .await
            .map_err(|err| PublishError::unreachable(err.to_string()))?;
        Ok(PublishReceipt::assign())
    }
}

/// Startup-time registration of subscribers against topics. Never mutated by
/// the request path.
#[derive(Debug, Clone, Default)]
pub struct TopicRegistry {
    subscribers: HashMap<TopicName, Vec<String>>,
}

impl TopicRegistry {
    /// Registers a delivery address on a topic. Re-registering the same
    /// address is a no-op.
    pub fn register(&mut self, topic: TopicName, address: impl Into<String>) {
        let list = self.subscribers.entry(topic).or_default();
        let address = address.into();
        if !list.contains(&address) {
            list.push(address);
        }
    }

    pub fn contains(&self, topic: &TopicName) -> bool {
        self.subscribers.contains_key(topic)
    }

    pub fn subscribers(&self, topic: &TopicName) -> &[String] {
        self.subscribers
            .get(topic)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// In-memory fan-out: one independent copy per registered subscriber, each
/// into its own mailbox. Backs the tests and the broker-less fallback mode.
#[derive(Clone, Default)]
pub struct InMemoryFanout {
    registry: Arc<TopicRegistry>,
    mailboxes: Arc<Mutex<HashMap<String, Vec<PublishEnvelope>>>>,
    attempts: Arc<Mutex<usize>>,
}

impl InMemoryFanout {
    pub fn new(registry: TopicRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            mailboxes: Arc::default(),
            attempts: Arc::default(),
        }
    }

    /// Drains the copies delivered to one subscriber.
    pub async fn deliveries(&self, address: &str) -> Vec<PublishEnvelope> {
        let mut mailboxes = self.mailboxes.lock().await;
        mailboxes.remove(address).unwrap_or_default()
    }

    /// Number of publish calls observed, successful or not.
    pub async fn publish_attempts(&self) -> usize {
        *self.attempts.lock().await
    }
}

#[async_trait]
impl Fanout for InMemoryFanout {
    async fn publish(&self, envelope: &PublishEnvelope) -> Result<PublishReceipt, PublishError> {
        *self.attempts.lock().await += 1;
        if !valid_topic(&envelope.topic) {
            return Err(PublishError::rejected(format!(
                "invalid topic `{}`",
                envelope.topic
            )));
        }
        if !self.registry.contains(&envelope.topic) {
            return Err(PublishError::rejected(format!(
                "topic `{}` not found",
                envelope.topic
            )));
        }
        let mut mailboxes = self.mailboxes.lock().await;
        for address in self.registry.subscribers(&envelope.topic) {
            mailboxes
                .entry(address.clone())
                .or_default()
                .push(envelope.clone());
        }
        Ok(PublishReceipt::assign())
    }
}
