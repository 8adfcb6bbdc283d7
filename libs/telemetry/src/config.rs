use std::env;

/// Logging configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub json_logs: bool,
}

impl TelemetryConfig {
    pub fn from_env(default_service_name: &str, default_service_version: &str) -> Self {
        let environment = env::var("DEPLOYMENT_ENV").unwrap_or_else(|_| "dev".into());
        let json_logs = env::var("LOG_FORMAT")
            .map(|v| !matches!(v.to_lowercase().as_str(), "text" | "pretty" | "plain"))
            .unwrap_or(true);

        Self {
            service_name: default_service_name.to_string(),
            service_version: default_service_version.to_string(),
            environment,
            json_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_service_identity() {
        let cfg = TelemetryConfig::from_env("sen-gateway", "0.1.0");
        assert_eq!(cfg.service_name, "sen-gateway");
        assert_eq!(cfg.service_version, "0.1.0");
    }
}
