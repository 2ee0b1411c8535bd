//! # TitleBar Component
//!
//! Top bar standing in for the storefront's navbar: app name, the path of
//! the screen on display, and a transient status message.
//!
//! Stateless: it receives everything as props and renders one line.
//!
//! 1. **With status**: `"Bookstall | /signup | Creating account..."`
//! 2. **Default**: `"Bookstall | /book/42"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Path of the current route (e.g. "/book/42")
    pub route_path: String,
    /// Status message (e.g. "Creating account...")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(route_path: String, status_message: String) -> Self {
        Self {
            route_path,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Bookstall",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.route_path.clone()),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
