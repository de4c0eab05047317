//! # Chat Backend
//!
//! The wire contract with the travel-assistant server: one `POST /chat` per
//! user message, one structured JSON reply. All request understanding and
//! route planning happen server-side; this module only moves bytes and
//! reports failures precisely.

mod client;
mod types;

pub use client::{ChatBackend, ChatError, HttpChatBackend};
pub use types::{ChatRequest, ChatResponse, DirectionsInfo, RouteStepInfo};
