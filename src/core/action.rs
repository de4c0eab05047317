//! # Actions
//!
//! Everything that can happen in Wayfarer becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The server replies? That's `Action::ChatArrived`.
//!
//! The `update()` function takes the current state and an action and mutates
//! the state, returning an `Effect` describing the one piece of I/O the
//! caller should perform. No I/O happens here, which makes the whole session
//! state machine testable by dispatching actions directly.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Ordering
//!
//! Each dispatched request carries a sequence number. `update()` applies a
//! completion only when its number matches `latest_seq`; anything else is a
//! stale completion (cancelled, superseded) and is dropped. Combined with
//! rejecting submissions while `AwaitingResponse`, the session always
//! reflects the most recently initiated request, regardless of completion
//! order.

use log::{debug, info, warn};

use crate::chat::{ChatError, ChatResponse};
use crate::core::handoff::{self, LaunchTarget};
use crate::core::state::{App, Phase};
use crate::core::transcript::Sender;
use crate::route::{PlannedRoute, RouteError};

#[derive(Debug)]
pub enum Action {
    /// User submitted the input buffer (may be empty - sent verbatim).
    Submit(String),
    /// A chat request completed, successfully or not.
    ChatArrived {
        seq: u64,
        result: Result<ChatResponse, ChatError>,
    },
    /// A route request completed, successfully or not.
    RouteArrived {
        seq: u64,
        result: Result<PlannedRoute, RouteError>,
    },
    /// User cancelled the in-flight request (Esc).
    CancelRequest,
    /// User asked to open the latest navigation link (Ctrl+G).
    LaunchNavigation,
    Quit,
}

/// I/O the caller must perform after an `update()`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Spawn a chat request for `message`, tagged with `seq`.
    SpawnChat { seq: u64, message: String },
    /// Spawn a route request for the given endpoints, tagged with `seq`.
    PlanRoute {
        seq: u64,
        origin: String,
        destination: String,
    },
    /// Open the navigation link (deep link or browser).
    OpenNavigation(LaunchTarget),
    /// Persist the current transcript.
    SaveSession,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(message) => submit(app, message),
        Action::ChatArrived { seq, result } => chat_arrived(app, seq, result),
        Action::RouteArrived { seq, result } => route_arrived(app, seq, result),
        Action::CancelRequest => cancel(app),
        Action::LaunchNavigation => launch_navigation(app),
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, message: String) -> Effect {
    if app.phase == Phase::AwaitingResponse {
        // Overlap guard: reject. Esc cancels if the user wants out.
        debug!("Submission rejected: request {} still in flight", app.latest_seq);
        app.status_message = String::from("Still waiting on the assistant (Esc cancels)");
        return Effect::None;
    }

    // The user's entry appears immediately, even when the message is empty.
    app.transcript.append(Sender::User, message.clone());
    // A route plan still resolving for the previous request is superseded:
    // its completion will be dropped, so its panel hint goes away now.
    app.pending_route = None;
    app.latest_seq += 1;
    app.phase = Phase::AwaitingResponse;
    app.status_message = String::from("Waiting for the assistant...");

    info!("Dispatching chat request seq={}", app.latest_seq);
    Effect::SpawnChat {
        seq: app.latest_seq,
        message,
    }
}

fn chat_arrived(app: &mut App, seq: u64, result: Result<ChatResponse, ChatError>) -> Effect {
    if seq != app.latest_seq || app.phase != Phase::AwaitingResponse {
        info!(
            "Dropping stale chat completion seq={} (latest={}, phase={:?})",
            seq, app.latest_seq, app.phase
        );
        return Effect::None;
    }
    app.phase = Phase::Idle;

    let reply = match result {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Chat request seq={} failed: {}", seq, e);
            app.transcript
                .append(Sender::Assistant, format!("[request failed: {e}]"));
            app.status_message = String::from("Request failed - try again");
            return Effect::SaveSession;
        }
    };

    app.transcript.append(Sender::Assistant, reply.response);
    app.status_message = String::from("Ready");

    let Some(info) = reply.directions_info else {
        return Effect::SaveSession;
    };

    if let Some(url) = info.waze_url {
        app.handoff.set_link(url);
    }

    app.pending_route = Some((info.origin.clone(), info.destination.clone()));
    app.status_message = format!("Routing {} -> {}...", info.origin, info.destination);
    Effect::PlanRoute {
        seq,
        origin: info.origin,
        destination: info.destination,
    }
}

fn route_arrived(app: &mut App, seq: u64, result: Result<PlannedRoute, RouteError>) -> Effect {
    if seq != app.latest_seq {
        info!(
            "Dropping stale route completion seq={} (latest={})",
            seq, app.latest_seq
        );
        return Effect::None;
    }
    app.pending_route = None;

    match result {
        Ok(route) => {
            app.status_message = format!("Route ready: {} ({})", route.distance, route.duration);
            app.route = Some(route);
        }
        Err(e) => {
            // Prior route stays displayed; the failure is a visible,
            // non-fatal notice rather than a silent drop.
            warn!("Route request seq={} failed: {}", seq, e);
            app.status_message = format!("Routing failed: {e}");
        }
    }
    Effect::SaveSession
}

fn cancel(app: &mut App) -> Effect {
    // Esc also aborts a route plan that outlived its chat reply; the panel
    // must not keep resolving endpoints nothing will deliver.
    app.pending_route = None;
    if app.phase != Phase::AwaitingResponse {
        return Effect::None;
    }
    // The aborted request may still complete; its seq guard drops it.
    info!("Cancelled request seq={}", app.latest_seq);
    app.phase = Phase::Idle;
    app.status_message = String::from("Request cancelled");
    Effect::None
}

fn launch_navigation(app: &mut App) -> Effect {
    let Some(link) = app.handoff.link() else {
        // No link has ever been set: contractually a no-op.
        debug!("Launch requested with no navigation link set");
        return Effect::None;
    };
    let target = handoff::launch_target(link, &app.agent);
    info!("Opening navigation link: {}", target.url());
    Effect::OpenNavigation(target)
}
