use anyhow::Result;
use sen_gateway::config::GatewayConfig;
use sen_telemetry::{TelemetryConfig, init_telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env("sen-gateway", env!("CARGO_PKG_VERSION"));
    init_telemetry(telemetry)?;

    let config = GatewayConfig::from_env()?;
    sen_gateway::run(config).await
}
