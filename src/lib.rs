//! Wayfarer library exports.
//!
//! A terminal chat client for a travel-assistant server: natural-language
//! requests go to `POST /chat`, replies land in the transcript, any returned
//! route is resolved through a directions provider and shown on the route
//! panel, and the latest Waze link can be handed off to the native app.

pub mod chat;
pub mod core;
pub mod route;
pub mod tui;

#[cfg(test)]
pub mod test_support;
