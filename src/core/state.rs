//! # Application State
//!
//! Core business state for Wayfarer. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>     // chat server client
//! ├── planner: Arc<dyn RoutePlanner>    // directions provider
//! ├── transcript: Transcript            // append-only chat history
//! ├── phase: Phase                      // Idle | AwaitingResponse
//! ├── latest_seq: u64                   // seq of latest dispatched request
//! ├── route: Option<PlannedRoute>       // currently drawn route
//! ├── pending_route: Option<(..)>       // endpoints being resolved
//! ├── handoff: Handoff                  // latest Waze link
//! ├── agent: String                     // platform agent string
//! └── status_message: String            // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::chat::ChatBackend;
use crate::core::config::ResolvedConfig;
use crate::core::handoff::Handoff;
use crate::core::transcript::Transcript;
use crate::route::{PlannedRoute, RoutePlanner};

/// Where the conversation session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready for the next submission.
    Idle,
    /// A chat request is in flight; further submissions are rejected.
    AwaitingResponse,
}

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub planner: Arc<dyn RoutePlanner>,
    pub transcript: Transcript,
    pub phase: Phase,
    /// Sequence number of the most recently dispatched request. Completions
    /// tagged with any other value are stale and dropped. Zero means nothing
    /// has been dispatched yet.
    pub latest_seq: u64,
    /// The route currently shown on the route panel. A failed plan leaves
    /// the previous route in place.
    pub route: Option<PlannedRoute>,
    /// Endpoints of an in-flight route request, shown while resolving.
    pub pending_route: Option<(String, String)>,
    pub handoff: Handoff,
    /// Platform agent string used for the deep-link rewrite decision.
    pub agent: String,
    pub status_message: String,
    /// Active session ID (None = unsaved new session).
    pub current_session_id: Option<String>,
}

impl App {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        planner: Arc<dyn RoutePlanner>,
        agent: String,
    ) -> Self {
        Self {
            backend,
            planner,
            transcript: Transcript::new(),
            phase: Phase::Idle,
            latest_seq: 0,
            route: None,
            pending_route: None,
            handoff: Handoff::new(),
            agent,
            status_message: String::from("Welcome to Wayfarer! Ask for a route."),
            current_session_id: None,
        }
    }

    pub fn from_config(
        backend: Arc<dyn ChatBackend>,
        planner: Arc<dyn RoutePlanner>,
        config: &ResolvedConfig,
    ) -> Self {
        Self::new(backend, planner, config.agent.clone())
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.latest_seq, 0);
        assert!(app.route.is_none());
        assert!(!app.handoff.is_available());
        assert!(app.transcript.is_empty());
    }
}
