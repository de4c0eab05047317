//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Awaiting a reply**: draws every ~80ms so the pending spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::handoff::LaunchTarget;
use crate::core::session;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, TranscriptListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub transcript_list: TranscriptListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript_list: TranscriptListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Leaves the alternate screen when dropped, so a `?` out of the event loop
/// (e.g. a failed draw) still hands the user their terminal back.
struct TerminalRestoreGuard;

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    // Declared before the mode guard: drops run in reverse, so terminal
    // modes are reset first, then the alternate screen is left
    let _restore_guard = TerminalRestoreGuard;
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handles for the in-flight request (used by Escape-to-cancel)
    let mut active_abort_handles: Vec<tokio::task::AbortHandle> = Vec::new();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_awaiting();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while the spinner runs, long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Esc → cancel the in-flight request (no-op while idle)
            if matches!(event, TuiEvent::Escape) {
                for handle in active_abort_handles.drain(..) {
                    handle.abort();
                }
                update(&mut app, Action::CancelRequest);
                continue;
            }

            // Ctrl+G → open the latest navigation link
            if matches!(event, TuiEvent::LaunchNavigation) {
                if let Effect::OpenNavigation(target) = update(&mut app, Action::LaunchNavigation) {
                    open_navigation(&mut app, &target);
                }
                continue;
            }

            // Scroll events go to the transcript list
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.transcript_list.handle_event(&event);
                continue;
            }

            // InputBox handles everything else
            if let Some(input_event) = tui.input_box.handle_event(&event) {
                match input_event {
                    InputEvent::Submit(text) => {
                        if let Effect::SpawnChat { seq, message } =
                            update(&mut app, Action::Submit(text))
                        {
                            active_abort_handles = vec![spawn_chat(&app, seq, message, tx.clone())];
                        }
                    }
                    InputEvent::ContentChanged => {}
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task completions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            // Background tasks only ever deliver completions; the quit and
            // navigation effects originate from key events above
            match update(&mut app, action) {
                Effect::SpawnChat { seq, message } => {
                    active_abort_handles = vec![spawn_chat(&app, seq, message, tx.clone())];
                }
                Effect::PlanRoute {
                    seq,
                    origin,
                    destination,
                } => {
                    active_abort_handles
                        .push(spawn_route(&app, seq, origin, destination, tx.clone()));
                }
                Effect::SaveSession => {
                    session::save_current_session(&mut app);
                }
                _ => {}
            }
        }
    }

    // Save on exit if there's content
    session::save_current_session(&mut app);

    Ok(())
}

/// Spawn the chat request as a background task. The returned handle lets
/// Esc abort it; a completion that outlives its cancellation is dropped by
/// the sequence guard in `update()`.
fn spawn_chat(
    app: &App,
    seq: u64,
    message: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning chat request seq={}", seq);
    let backend = app.backend.clone();

    let handle = tokio::spawn(async move {
        let result = backend.send(&message).await;
        if tx.send(Action::ChatArrived { seq, result }).is_err() {
            warn!("Failed to deliver chat completion seq={}: receiver dropped", seq);
        }
    });
    handle.abort_handle()
}

fn spawn_route(
    app: &App,
    seq: u64,
    origin: String,
    destination: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning route request seq={} ({} -> {})", seq, origin, destination);
    let planner = app.planner.clone();

    let handle = tokio::spawn(async move {
        let result = planner.plan(&origin, &destination).await;
        if tx.send(Action::RouteArrived { seq, result }).is_err() {
            warn!("Failed to deliver route completion seq={}: receiver dropped", seq);
        }
    });
    handle.abort_handle()
}

/// Hand the navigation URL to the platform opener. Deep links and web URLs
/// go through the same door; the scheme decides which app answers.
fn open_navigation(app: &mut App, target: &LaunchTarget) {
    let url = target.url();

    #[cfg(target_os = "linux")]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(url).spawn();
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn();
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();

    match result {
        Ok(_) => {
            app.status_message = format!("Opened {}", url);
        }
        Err(e) => {
            warn!("Failed to open navigation link {}: {}", url, e);
            app.status_message = format!("Could not open link: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_guard_drop_outside_alternate_screen() {
        // Dropping without an entered terminal must not panic; the error
        // path out of run() relies on exactly this
        drop(TerminalRestoreGuard);
    }
}
