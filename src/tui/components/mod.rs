//! Reusable TUI components.
//!
//! Persistent state lives in `TuiState`; the components themselves are
//! created fresh each frame with references to that state and to the data
//! they render.

pub mod entry;
pub mod input_box;
pub mod route_panel;
pub mod transcript_list;

pub use input_box::{InputBox, InputEvent};
pub use route_panel::RoutePanel;
pub use transcript_list::{TranscriptList, TranscriptListState};
