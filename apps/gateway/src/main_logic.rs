use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::serve;
use sen_bus::{Fanout, InMemoryFanout, NatsFanout, TopicRegistry};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::http::{AppState, build_router};

/// Starts the gateway HTTP server using the provided configuration.
pub async fn run(config: GatewayConfig) -> Result<()> {
    let policy = Arc::new(config.policy()?);
    let fanout = connect_fanout(&config).await;
    let state = AppState {
        fanout,
        topic: config.topic.clone(),
    };
    let router = build_router(state, policy, config.trust_forwarded_for);
    let listener = TcpListener::bind(config.addr).await?;
    info!("sen-gateway listening on {}", config.addr);

    serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        tokio::signal::ctrl_c().await.ok();
    })
    .await?;

    Ok(())
}

/// Connects the production fan-out. When the broker is unreachable the
/// gateway degrades to the in-memory topic with the configured subscriber
/// registered, rather than refusing to start.
async fn connect_fanout(config: &GatewayConfig) -> Arc<dyn Fanout> {
    match async_nats::connect(config.nats_url.as_str()).await {
        Ok(client) => {
            info!(topic = %config.topic, "connected to broker at {}", config.nats_url);
            Arc::new(NatsFanout::new(client))
        }
        Err(err) => {
            warn!(error = %err, "broker unavailable, using in-memory fan-out");
            let mut registry = TopicRegistry::default();
            registry.register(config.topic.clone(), config.subscription_email.clone());
            Arc::new(InMemoryFanout::new(registry))
        }
    }
}
