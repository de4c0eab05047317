//! # TranscriptList Component
//!
//! Scrollable view of the conversation transcript.
//!
//! `TranscriptList` is a transient component (created each frame) wrapping
//! `&mut TranscriptListState` (persistent scroll state) and the transcript
//! (props). Rendered order is the transcript's append order; new entries
//! auto-scroll into view while the user stays pinned to the bottom.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::entry::Entry;
use crate::tui::event::TuiEvent;

const SPINNER_FRAMES: [&str; 4] = ["waiting   ", "waiting.  ", "waiting.. ", "waiting..."];
/// Height of the pending-reply indicator line.
const PENDING_HEIGHT: u16 = 1;

/// Scroll state for the transcript list. Persisted in the parent TuiState.
pub struct TranscriptListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known content height (for re-pin checks between frames)
    content_height: u16,
    /// Last known viewport height
    viewport_height: u16,
}

impl Default for TranscriptListState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            content_height: 0,
            viewport_height: 0,
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

/// EventHandler lives on the state (not the transient component) because
/// scroll position must persist across frames.
impl EventHandler for TranscriptListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Transient per-frame view over the transcript.
pub struct TranscriptList<'a> {
    pub state: &'a mut TranscriptListState,
    pub transcript: &'a Transcript,
    /// A chat request is in flight; show the pending indicator.
    pub awaiting: bool,
    pub spinner_frame: usize,
}

impl<'a> TranscriptList<'a> {
    pub fn new(
        state: &'a mut TranscriptListState,
        transcript: &'a Transcript,
        awaiting: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            awaiting,
            spinner_frame,
        }
    }
}

impl<'a> Component for TranscriptList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // Measure every entry up front so scroll math is exact
        let heights: Vec<u16> = self
            .transcript
            .entries()
            .iter()
            .map(|e| Entry::calculate_height(e, content_width))
            .collect();
        let mut total_height: u16 = heights.iter().sum();
        if self.awaiting {
            total_height += PENDING_HEIGHT;
        }

        self.state.content_height = total_height;
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (entry, height) in self.transcript.entries().iter().zip(&heights) {
            let rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(Entry::new(entry), rect);
            y_offset += height;
        }

        if self.awaiting {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let rect = Rect::new(0, y_offset, content_width, PENDING_HEIGHT);
            scroll_view.render_widget(
                Paragraph::new(spinner).style(Style::default().fg(Color::DarkGray)),
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Sender;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn transcript_with(texts: &[(Sender, &str)]) -> Transcript {
        let mut t = Transcript::new();
        for (sender, text) in texts {
            t.append(*sender, text.to_string());
        }
        t
    }

    fn render_to_text(transcript: &Transcript, awaiting: bool, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = TranscriptListState::new();
        terminal
            .draw(|f| {
                let mut list = TranscriptList::new(&mut state, transcript, awaiting, 0);
                list.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_entries_in_append_order() {
        let t = transcript_with(&[
            (Sender::User, "first message"),
            (Sender::Assistant, "second message"),
        ]);
        let text = render_to_text(&t, false, 50, 12);
        let first = text.find("first message").unwrap();
        let second = text.find("second message").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_pending_indicator_shown_while_awaiting() {
        let t = transcript_with(&[(Sender::User, "hello")]);
        let text = render_to_text(&t, true, 50, 12);
        assert!(text.contains("waiting"));
    }

    #[test]
    fn test_no_pending_indicator_when_idle() {
        let t = transcript_with(&[(Sender::User, "hello")]);
        let text = render_to_text(&t, false, 50, 12);
        assert!(!text.contains("waiting"));
    }

    #[test]
    fn test_scroll_up_unpins_from_bottom() {
        let mut state = TranscriptListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }
}
