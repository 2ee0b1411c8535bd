//! # Notice Popup
//!
//! Centered overlay for messages the user must acknowledge (validation
//! errors, signup results, entitlement refusals). Any key dismisses it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::state::{Notice, NoticeKind};
use crate::tui::component::Component;

pub struct NoticePopup<'a> {
    notice: &'a Notice,
}

impl<'a> NoticePopup<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }
}

impl Component for NoticePopup<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 7, area);
        frame.render_widget(Clear, overlay);

        let (title, color) = match self.notice.kind {
            NoticeKind::Info => (" Notice ", Color::Green),
            NoticeKind::Error => (" Error ", Color::Red),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title)
            .title_bottom(Line::from(" Enter OK ").centered())
            .padding(Padding::uniform(1));

        frame.render_widget(
            Paragraph::new(self.notice.text.as_str())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block),
            overlay,
        );
    }
}

/// A rect `percent_x` wide and `height` rows tall, centered in `outer`.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
