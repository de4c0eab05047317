//! # RoutePanel Component
//!
//! The persistent route surface. Shows the currently drawn route (endpoints,
//! distance, duration, first steps) and, while a plan is being resolved, the
//! requested endpoints. A failed plan never clears the panel: the prior
//! route stays until a newer one replaces it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::route::PlannedRoute;
use crate::tui::component::Component;

/// Steps shown before the listing is elided.
const MAX_VISIBLE_STEPS: usize = 4;
/// Borders plus the summary line.
const BASE_HEIGHT: u16 = 3;

pub struct RoutePanel<'a> {
    pub route: Option<&'a PlannedRoute>,
    /// Endpoints currently being resolved, if any.
    pub pending: Option<&'a (String, String)>,
    /// Show the handoff hint once a navigation link exists.
    pub handoff_available: bool,
}

impl<'a> RoutePanel<'a> {
    pub fn new(
        route: Option<&'a PlannedRoute>,
        pending: Option<&'a (String, String)>,
        handoff_available: bool,
    ) -> Self {
        Self {
            route,
            pending,
            handoff_available,
        }
    }

    /// Height needed for the current content.
    pub fn calculate_height(&self) -> u16 {
        match self.route {
            None => BASE_HEIGHT,
            Some(route) => {
                let steps = route.steps.len().min(MAX_VISIBLE_STEPS) as u16;
                let elision = u16::from(route.steps.len() > MAX_VISIBLE_STEPS);
                BASE_HEIGHT + 1 + steps + elision
            }
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        match (self.route, self.pending) {
            (_, Some((origin, destination))) => {
                lines.push(Line::from(Span::styled(
                    format!("Resolving {origin} -> {destination}..."),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            (None, None) => {
                lines.push(Line::from(Span::styled(
                    "No route yet - ask for directions",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            (Some(_), None) => {}
        }

        if let Some(route) = self.route {
            lines.push(Line::from(vec![
                Span::styled(
                    route.origin.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" -> "),
                Span::styled(
                    route.destination.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(format!(
                "{}, about {}",
                route.distance, route.duration
            )));
            for (i, step) in route.steps.iter().take(MAX_VISIBLE_STEPS).enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("{}. {} ({})", i + 1, step.instruction, step.distance),
                    Style::default().fg(Color::Gray),
                )));
            }
            if route.steps.len() > MAX_VISIBLE_STEPS {
                lines.push(Line::from(Span::styled(
                    format!("... {} more steps", route.steps.len() - MAX_VISIBLE_STEPS),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        lines
    }
}

impl<'a> Component for RoutePanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.handoff_available {
            "Route (Ctrl+G opens Waze)"
        } else {
            "Route"
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title);

        frame.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}
