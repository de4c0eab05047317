//! # Core Application Logic
//!
//! This module contains Wayfarer's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum — everything that can happen in the app
//! - [`transcript`]: Append-only conversation history
//! - [`handoff`]: Waze deep-link state and platform detection
//! - [`config`]: Settings with a defaults → file → env → CLI hierarchy
//! - [`session`]: Transcript persistence under `~/.wayfarer/sessions/`

pub mod action;
pub mod config;
pub mod handoff;
pub mod session;
pub mod state;
pub mod transcript;
