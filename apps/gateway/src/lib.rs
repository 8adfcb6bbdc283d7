//! Stripe event notification gateway: admits webhook calls by source-address
//! allowlist, transforms each admitted body into a publish envelope, and
//! fans it out to the topic's subscribers.

pub mod config;
pub mod http;
mod main_logic;

pub use main_logic::run;
pub use sen_bus::{Fanout, InMemoryFanout, NatsFanout, TopicRegistry};
