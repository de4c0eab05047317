use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{RoutePanel, TranscriptList};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let mut route_panel = RoutePanel::new(
        app.route.as_ref(),
        app.pending_route.as_ref(),
        app.handoff.is_available(),
    );

    let layout = Layout::vertical([
        Min(0),
        Length(route_panel.calculate_height()),
        Length(INPUT_HEIGHT),
        Length(1),
    ]);
    let [transcript_area, route_area, input_area, status_area] = layout.areas(frame.area());

    let mut transcript_list = TranscriptList::new(
        &mut tui.transcript_list,
        &app.transcript,
        app.is_awaiting(),
        spinner_frame,
    );
    transcript_list.render(frame, transcript_area);

    route_panel.render(frame, route_area);

    tui.input_box.render(frame, input_area);

    frame.render_widget(status_line(app), status_area);
}

fn status_line(app: &App) -> Line<'_> {
    let mut spans = vec![Span::styled(
        app.status_message.as_str(),
        Style::default().fg(Color::Gray),
    )];
    if app.handoff.is_available() {
        spans.push(Span::styled(
            "  [Ctrl+G: navigate]",
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        "  [Ctrl+C: quit]",
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Sender;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_empty_session() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Welcome to Wayfarer"));
        assert!(text.contains("No route yet"));
    }

    #[test]
    fn test_draw_ui_shows_transcript() {
        let mut app = test_app();
        app.transcript
            .append(Sender::User, "take me to the airport".to_string());
        app.transcript.append(Sender::Assistant, "On it".to_string());
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("take me to the airport"));
        assert!(text.contains("On it"));
    }

    #[test]
    fn test_status_line_shows_navigate_hint_once_link_set() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(!text.contains("Ctrl+G"));

        app.handoff
            .set_link("https://www.waze.com/ul?q=airport".to_string());
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Ctrl+G"));
    }
}
