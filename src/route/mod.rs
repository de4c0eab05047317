//! # Route Planning
//!
//! Resolves free-form origin/destination strings into a driving route via an
//! external directions provider. The rest of the crate depends only on the
//! [`RoutePlanner`] request/result contract, never on provider internals.
//! The drawn route lives in `App::route`; a failed plan leaves it untouched.

mod planner;
mod types;

pub use planner::{DirectionsApi, RouteError, RoutePlanner};
pub use types::{PlannedRoute, RouteStep};
