use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sen_policy::{Effect, PolicyDocument};

use crate::telemetry::record_denied;

/// Perimeter configuration injected as a request extension. The default is
/// an empty policy document, which denies every caller, so a route that
/// forgets to attach its configuration fails closed.
#[derive(Clone, Default)]
pub struct PerimeterConfig {
    pub policy: Arc<PolicyDocument>,
    /// Trust the first `x-forwarded-for` hop instead of the socket peer.
    /// Only for deployments behind a fronting proxy.
    pub trust_forwarded_for: bool,
}

/// Source-address admission, evaluated before any handler logic. Denied
/// callers get the uniform perimeter response and never reach the handler.
pub async fn enforce_perimeter(req: Request<Body>, next: Next) -> Response {
    let cfg = req
        .extensions()
        .get::<PerimeterConfig>()
        .cloned()
        .unwrap_or_default();

    let source = source_address(&req, cfg.trust_forwarded_for);
    match cfg.policy.evaluate(source) {
        Effect::Allow => next.run(req).await,
        Effect::Deny => {
            let shown = source
                .map(|ip| ip.to_string())
                .unwrap_or_else(|| "unknown".into());
            record_denied(source);
            tracing::warn!(source = %shown, "perimeter denied request");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

fn source_address(req: &Request<Body>, trust_forwarded_for: bool) -> Option<IpAddr> {
    if trust_forwarded_for {
        return req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|hop| hop.trim().parse().ok());
    }
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
