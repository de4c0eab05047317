use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{DirectionsReply, PlannedRoute};

/// Errors that can occur while planning a route.
#[derive(Debug)]
pub enum RouteError {
    /// Provider misconfigured (missing API key).
    Config(String),
    /// Network-level failure reaching the provider.
    Network(String),
    /// Provider returned a non-success HTTP status.
    Api { status: u16, message: String },
    /// Provider answered but reported a non-OK routing status
    /// (e.g. `ZERO_RESULTS`, `NOT_FOUND`).
    Status(String),
    /// Failed to parse the provider's response.
    Parse(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Config(msg) => write!(f, "config error: {msg}"),
            RouteError::Network(msg) => write!(f, "network error: {msg}"),
            RouteError::Api { status, message } => {
                write!(f, "directions API error (HTTP {status}): {message}")
            }
            RouteError::Status(status) => write!(f, "no route found ({status})"),
            RouteError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Resolves two free-form location strings into a driving route.
#[async_trait]
pub trait RoutePlanner: Send + Sync {
    async fn plan(&self, origin: &str, destination: &str) -> Result<PlannedRoute, RouteError>;
}

/// Directions REST client (`/maps/api/directions/json`, driving mode).
pub struct DirectionsApi {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl DirectionsApi {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RoutePlanner for DirectionsApi {
    async fn plan(&self, origin: &str, destination: &str) -> Result<PlannedRoute, RouteError> {
        if self.api_key.is_empty() {
            return Err(RouteError::Config(
                "directions API key is not set (GOOGLE_API_KEY)".to_string(),
            ));
        }

        info!("Directions request: '{}' -> '{}'", origin, destination);

        let response = self
            .client
            .get(format!("{}/maps/api/directions/json", self.base_url))
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| RouteError::Network(e.to_string()))?;

        debug!("Directions response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Directions API error: {} - {}", status, message);
            return Err(RouteError::Api { status, message });
        }

        let reply: DirectionsReply = response
            .json()
            .await
            .map_err(|e| RouteError::Parse(e.to_string()))?;

        if reply.status != "OK" {
            let detail = reply
                .error_message
                .map(|m| format!("{}: {}", reply.status, m))
                .unwrap_or(reply.status);
            warn!("Routing failed: {}", detail);
            return Err(RouteError::Status(detail));
        }

        let leg = reply
            .routes
            .into_iter()
            .next()
            .and_then(|r| r.legs.into_iter().next())
            .ok_or_else(|| RouteError::Parse("OK reply with no route legs".to_string()))?;

        let route = PlannedRoute::from(leg);
        info!(
            "Route resolved: {} -> {} ({}, {})",
            route.origin, route.destination, route.distance, route.duration
        );
        Ok(route)
    }
}
