//! Startup configuration for the notification gateway.

use std::net::SocketAddr;
use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use sen_core::TopicName;
use sen_policy::{IpAllowlist, PolicyDocument};
use serde::Deserialize;

/// Default pub/sub topic receiving webhook events.
pub const DEFAULT_TOPIC: &str = "stripe-notification-topic";

/// Source addresses Stripe originates webhook calls from.
pub const STRIPE_WEBHOOK_SOURCE_IPS: [&str; 12] = [
    "3.18.12.63",
    "3.130.192.231",
    "13.235.14.237",
    "13.235.122.149",
    "18.211.135.69",
    "35.154.171.200",
    "52.15.183.38",
    "54.88.130.119",
    "54.88.130.237",
    "54.187.174.169",
    "54.187.205.235",
    "54.187.216.72",
];

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub nats_url: String,
    pub topic: TopicName,
    pub subscription_email: String,
    pub allowed_ips: Vec<String>,
    pub trust_forwarded_for: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct GatewayFile {
    gateway: GatewaySection,
}

#[derive(Debug, Clone, Deserialize)]
struct GatewaySection {
    #[serde(default = "default_bind")]
    bind: String,
    #[serde(default = "default_nats_url")]
    nats_url: String,
    #[serde(default = "default_topic")]
    topic: String,
    #[serde(default)]
    subscription_email: Option<String>,
    #[serde(default)]
    allowed_ips: Option<Vec<String>>,
    #[serde(default)]
    trust_forwarded_for: bool,
}

impl GatewayConfig {
    /// Resolves configuration from the YAML file named by `SEN_CONFIG` when
    /// present, with environment fallbacks for every field.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("SEN_CONFIG").ok();
        Self::load(path.as_deref())
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        if let Some(path) = config_path {
            let path = Path::new(path);
            if path.exists() {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("read gateway config {}", path.display()))?;
                let file: GatewayFile = serde_yaml_bw::from_str(&raw)
                    .with_context(|| format!("parse gateway config {}", path.display()))?;
                return Self::from_section(file.gateway);
            }
        }
        Self::from_section(env_section())
    }

    fn from_section(section: GatewaySection) -> Result<Self> {
        let addr: SocketAddr = section
            .bind
            .parse()
            .with_context(|| format!("invalid bind address `{}`", section.bind))?;
        let Some(subscription_email) = section
            .subscription_email
            .filter(|email| !email.trim().is_empty())
        else {
            bail!("subscription email is required (set SEN_SUBSCRIPTION_EMAIL)");
        };
        Ok(Self {
            addr,
            nats_url: section.nats_url,
            topic: TopicName::new(section.topic),
            subscription_email,
            allowed_ips: section.allowed_ips.unwrap_or_else(default_allowed_ips),
            trust_forwarded_for: section.trust_forwarded_for,
        })
    }

    /// Parses the configured entries. A malformed entry is startup-fatal.
    pub fn allowlist(&self) -> Result<IpAllowlist> {
        IpAllowlist::parse(&self.allowed_ips).context("invalid source allowlist")
    }

    pub fn policy(&self) -> Result<PolicyDocument> {
        Ok(PolicyDocument::restrict_to(self.allowlist()?))
    }
}

fn env_section() -> GatewaySection {
    GatewaySection {
        bind: std::env::var("SEN_BIND").unwrap_or_else(|_| default_bind()),
        nats_url: std::env::var("NATS_URL").unwrap_or_else(|_| default_nats_url()),
        topic: std::env::var("SEN_TOPIC").unwrap_or_else(|_| default_topic()),
        subscription_email: std::env::var("SEN_SUBSCRIPTION_EMAIL").ok(),
        allowed_ips: std::env::var("SEN_ALLOWED_IPS").ok().map(|raw| {
            raw.split(',')
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect()
        }),
        trust_forwarded_for: std::env::var("SEN_TRUST_FORWARDED_FOR")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false),
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".into()
}

fn default_nats_url() -> String {
    "nats://127.0.0.1:4222".into()
}

fn default_topic() -> String {
    DEFAULT_TOPIC.into()
}

fn default_allowed_ips() -> Vec<String> {
    STRIPE_WEBHOOK_SOURCE_IPS
        .iter()
        .map(|entry| entry.to_string())
        .collect()
}
