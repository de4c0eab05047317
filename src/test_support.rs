//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::chat::{ChatBackend, ChatError, ChatResponse};
use crate::route::{PlannedRoute, RouteError, RoutePlanner};

/// A no-op backend for tests that drive the reducer directly.
pub struct NoopBackend;

#[async_trait]
impl ChatBackend for NoopBackend {
    async fn send(&self, _message: &str) -> Result<ChatResponse, ChatError> {
        Ok(ChatResponse {
            response: String::new(),
            directions_info: None,
        })
    }
}

/// A planner that never finds a route.
pub struct NoopPlanner;

#[async_trait]
impl RoutePlanner for NoopPlanner {
    async fn plan(&self, _origin: &str, _destination: &str) -> Result<PlannedRoute, RouteError> {
        Err(RouteError::Status("ZERO_RESULTS".to_string()))
    }
}

/// Creates a test App with noop collaborators and a desktop agent string.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(NoopBackend),
        Arc::new(NoopPlanner),
        "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
    )
}
