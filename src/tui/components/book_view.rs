//! # Book View Component
//!
//! Renders the book detail screen for whatever view-state it is handed:
//! a placeholder while loading, a not-found line, the failure text, or the
//! book itself with its sanitized description and the "Start Reading" action.
//!
//! The description can be longer than the screen; `scroll` is a prop owned
//! by `TuiState` and clamped here to the rendered height.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::api::Book;
use crate::core::book_detail::BookDetailState;
use crate::core::view_state::ViewState;
use crate::tui::component::Component;
use crate::tui::html;

pub const LOADING_TEXT: &str = "Loading...";
pub const NOT_FOUND_TEXT: &str = "Book not found";
pub const START_READING_LABEL: &str = "Start Reading";

/// Text shown instead of the book when it is not ready.
pub fn placeholder_text(view: &ViewState<Book>) -> Option<&str> {
    match view {
        ViewState::Loading => Some(LOADING_TEXT),
        ViewState::Empty => Some(NOT_FOUND_TEXT),
        ViewState::Failed(message) => Some(message),
        ViewState::Ready(_) => None,
    }
}

pub struct BookView<'a> {
    state: &'a BookDetailState,
    scroll: &'a mut u16,
}

impl<'a> BookView<'a> {
    pub fn new(state: &'a BookDetailState, scroll: &'a mut u16) -> Self {
        Self { state, scroll }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect, text: &str) {
        let paragraph = match &self.state.view {
            ViewState::Failed(_) => Paragraph::new(text)
                .style(Style::default().fg(Color::Red))
                .block(Block::bordered().title("ERROR")),
            _ => Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        };
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(
            paragraph.alignment(Alignment::Center).wrap(Wrap { trim: true }),
            middle,
        );
    }

    fn render_book(&mut self, frame: &mut Frame, area: Rect, book: &Book) {
        let [cover_area, details_area] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
                .areas(area);

        let cover = Paragraph::new(vec![
            Line::from(Span::styled(
                book.title.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::default(),
            Line::from(Span::styled(
                book.image.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Cover ")
                .padding(Padding::uniform(1)),
        );
        frame.render_widget(cover, cover_area);

        let [heading_area, description_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(6),
        ])
        .areas(details_area);

        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                book.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(book.byline(), Style::default().fg(Color::Gray))),
        ])
        .block(Block::default().padding(Padding::horizontal(1)));
        frame.render_widget(heading, heading_area);

        let description: Text = html::render(&book.description, Color::Gray);
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let inner_width = description_area.width.saturating_sub(2);
        let inner_height = description_area.height.saturating_sub(2);
        let paragraph = Paragraph::new(description).wrap(Wrap { trim: false });
        let line_count = u16::try_from(paragraph.line_count(inner_width)).unwrap_or(u16::MAX);
        let max_scroll = line_count.saturating_sub(inner_height);
        *self.scroll = (*self.scroll).min(max_scroll);
        frame.render_widget(
            paragraph.block(block).scroll((*self.scroll, 0)),
            description_area,
        );

        let mut footer = vec![Line::from(Span::styled(
            book.price.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))];
        if !book.purchase_link.is_empty() {
            footer.push(Line::from(vec![
                Span::styled("Buy: ", Style::default().fg(Color::DarkGray)),
                Span::styled(book.purchase_link.clone(), Style::default().fg(Color::Cyan)),
            ]));
        }
        if !book.reader_content.is_empty() {
            footer.push(Line::from(vec![
                Span::styled("Read: ", Style::default().fg(Color::DarkGray)),
                Span::styled(book.reader_content.clone(), Style::default().fg(Color::Cyan)),
            ]));
        }
        footer.push(Line::default());
        footer.push(Line::from(Span::styled(
            format!(" {START_READING_LABEL} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(
            Paragraph::new(footer).block(Block::default().padding(Padding::horizontal(1))),
            footer_area,
        );
    }
}

impl Component for BookView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let state = self.state;
        match &state.view {
            ViewState::Ready(book) => self.render_book(frame, area, book),
            view => {
                let text = placeholder_text(view).unwrap_or_default().to_string();
                self.render_placeholder(frame, area, &text);
            }
        }
    }
}
