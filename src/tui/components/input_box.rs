//! # InputBox Component
//!
//! Single-line text input with horizontal scrolling.
//!
//! The buffer is internal state; Enter submits it verbatim. Empty
//! submissions are allowed by design: the session contract sends whatever is
//! in the box, whitespace and all, and lets the server decide what to do
//! with it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Horizontal space consumed by the two border columns.
const BORDER_OVERHEAD: u16 = 2;
/// Fixed component height: one text row plus borders.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed). May be empty.
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`
    cursor: usize,
    /// First visible column (display width units) for horizontal scrolling
    scroll: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
        }
    }

    fn prev_char_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Display width of the buffer up to the cursor.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0) as u16)
            .sum()
    }

    /// Keep the cursor within the visible window of `inner_width` columns.
    fn update_scroll(&mut self, inner_width: u16) {
        if inner_width == 0 {
            return;
        }
        let col = self.cursor_column();
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + inner_width {
            self.scroll = col + 1 - inner_width;
        }
    }

    /// The slice of the buffer visible at the current scroll offset.
    fn visible_text(&self, inner_width: u16) -> String {
        let mut out = String::new();
        let mut col = 0u16;
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0) as u16;
            if col + w > self.scroll + inner_width {
                break;
            }
            if col >= self.scroll {
                out.push(c);
            }
            col += w;
        }
        out
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(BORDER_OVERHEAD);
        self.update_scroll(inner_width);

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title("Message (Enter sends)");

        let input = Paragraph::new(self.visible_text(inner_width))
            .block(block)
            .style(Style::default().fg(Color::Cyan));

        frame.render_widget(input, area);

        let cursor_x = area.x + 1 + self.cursor_column().saturating_sub(self.scroll);
        let max_x = (area.x + area.width).saturating_sub(2);
        frame.set_cursor_position((cursor_x.min(max_x), area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line input: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_char_boundary();
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                (self.cursor != 0).then(|| {
                    self.cursor = 0;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                (self.cursor != self.buffer.len()).then(|| {
                    self.cursor = self.buffer.len();
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                // Empty submissions are sent on purpose
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_input_box_new() {
        let input = InputBox::new();
        assert!(input.buffer.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("hello world".to_string()));

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello world".to_string())));
        assert!(input.buffer.is_empty(), "buffer cleared after submit");
    }

    #[test]
    fn test_empty_submit_is_allowed() {
        let mut input = InputBox::new();
        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit(String::new())));
    }

    #[test]
    fn test_whitespace_is_preserved_verbatim() {
        let mut input = InputBox::new();
        for c in "  padded  ".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("  padded  ".to_string())));
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("line one\nline two".to_string()));
        assert_eq!(input.buffer, "line one line two");
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::InputChar('é'));
        input.handle_event(&TuiEvent::InputChar('x'));
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_home_and_end() {
        let mut input = InputBox::new();
        for c in "abc".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(input.buffer, ">abc");
        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('<'));
        assert_eq!(input.buffer, ">abc<");
    }

    #[test]
    fn test_render_shows_buffer() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("airport please".to_string()));

        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("airport please"));
    }
}
