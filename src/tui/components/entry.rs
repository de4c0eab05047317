use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{Sender, TranscriptEntry};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless widget rendering one transcript entry with sender styling.
///
/// `Entry` is a transient component: created fresh each frame with a
/// reference to the data it renders. User entries are cyan, assistant
/// entries green. An entry with empty text still occupies a (bordered)
/// empty line, so empty submissions remain visible in the history.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    pub entry: &'a TranscriptEntry,
}

impl<'a> Entry<'a> {
    pub fn new(entry: &'a TranscriptEntry) -> Self {
        Self { entry }
    }

    /// Predict the rendered height for a given width without rendering.
    ///
    /// Uses `textwrap` with options matching Ratatui's `Paragraph` wrapping
    /// so the parent list can compute scroll positions ahead of the render
    /// pass.
    pub fn calculate_height(entry: &TranscriptEntry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row
            return 1;
        }

        let content = entry.text.trim_end();
        if content.is_empty() {
            return 1 + VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for Entry<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let (label, color) = match self.entry.sender {
            Sender::User => ("you", Color::Cyan),
            Sender::Assistant => ("wayfarer", Color::Green),
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .padding(Padding::horizontal(CONTENT_PAD_H))
            .title(label);

        Paragraph::new(self.entry.text.trim_end())
            .block(block)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn entry(sender: Sender, text: &str) -> TranscriptEntry {
        TranscriptEntry {
            sender,
            text: text.to_string(),
            ordinal: 0,
        }
    }

    #[test]
    fn test_height_single_line() {
        let e = entry(Sender::User, "short");
        assert_eq!(Entry::calculate_height(&e, 40), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_height_wraps_long_text() {
        let e = entry(Sender::User, &"word ".repeat(30));
        let narrow = Entry::calculate_height(&e, 20);
        let wide = Entry::calculate_height(&e, 120);
        assert!(narrow > wide);
    }

    #[test]
    fn test_empty_entry_still_has_height() {
        let e = entry(Sender::User, "");
        assert_eq!(Entry::calculate_height(&e, 40), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_sender_label() {
        let backend = TestBackend::new(40, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let e = entry(Sender::Assistant, "On it");

        terminal
            .draw(|f| {
                let widget = Entry::new(&e);
                f.render_widget(widget, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("wayfarer"));
        assert!(text.contains("On it"));
    }
}
