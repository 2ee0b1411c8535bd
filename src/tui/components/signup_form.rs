//! # Signup Form Component
//!
//! The account creation screen: four labelled inputs, the submit button,
//! and the agreement and sign-in lines underneath.
//!
//! Field values are not owned here. `values` and `in_flight` are props
//! synced from `App` before each event, and every keystroke comes back out
//! as `SignupEvent::Changed` with the field's full new value, so the core
//! stays the single owner of the form.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::signup::{Field, MIN_PASSWORD_CHARS, SignupForm};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const FORM_WIDTH: u16 = 60;
const MASK: char = '•';

const AGREEMENT_TEXT: &str = "By creating an account, you agree to the Conditions of Use & Sale, \
    the Store Terms of Use and the Privacy Notice.";

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Field(Field::Name),
        Focus::Field(Field::Email),
        Focus::Field(Field::Password),
        Focus::Field(Field::ConfirmPassword),
        Focus::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// High-level events emitted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEvent {
    Changed(Field, String),
    Submit,
    SignIn,
    Back,
}

pub struct SignupFormState {
    pub focus: Focus,
    /// Current form values (Prop)
    pub values: SignupForm,
    /// Submission pending (Prop)
    pub in_flight: bool,
}

impl SignupFormState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Field(Field::Name),
            values: SignupForm::default(),
            in_flight: false,
        }
    }

    fn edit(&self, f: impl FnOnce(&mut String)) -> Option<SignupEvent> {
        let Focus::Field(field) = self.focus else {
            return None;
        };
        let mut value = self.values.get(field).to_string();
        f(&mut value);
        Some(SignupEvent::Changed(field, value))
    }
}

impl Default for SignupFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for SignupFormState {
    type Event = SignupEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SignupEvent> {
        match event {
            TuiEvent::NextField | TuiEvent::ScrollDown => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::PrevField | TuiEvent::ScrollUp => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::InputChar(c) => self.edit(|v| v.push(*c)),
            // Single-line inputs: newlines in pasted text are dropped
            TuiEvent::Paste(text) => {
                self.edit(|v| v.extend(text.chars().filter(|c| *c != '\n' && *c != '\r')))
            }
            TuiEvent::Backspace => self.edit(|v| {
                v.pop();
            }),
            // Enter submits from any field, like a browser form
            TuiEvent::Submit if !self.in_flight => Some(SignupEvent::Submit),
            TuiEvent::SignIn => Some(SignupEvent::SignIn),
            TuiEvent::Escape => Some(SignupEvent::Back),
            _ => None,
        }
    }
}

/// Transient render wrapper around the persistent form state.
pub struct SignupFormView<'a> {
    state: &'a SignupFormState,
    submit_label: &'a str,
}

impl<'a> SignupFormView<'a> {
    pub fn new(state: &'a SignupFormState, submit_label: &'a str) -> Self {
        Self {
            state,
            submit_label,
        }
    }

    fn display_value(&self, field: Field) -> (String, Style) {
        let value = self.state.values.get(field);
        if value.is_empty() {
            let placeholder = field.placeholder().unwrap_or_default();
            return (placeholder.to_string(), Style::default().fg(Color::DarkGray));
        }
        let shown = if field.is_secret() {
            MASK.to_string().repeat(value.chars().count())
        } else {
            value.to_string()
        };
        (shown, Style::default().fg(Color::White))
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: Field) {
        let [label_area, input_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(area);
        let focused = self.state.focus == Focus::Field(field);

        frame.render_widget(
            Paragraph::new(Span::styled(
                field.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            label_area,
        );

        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let (shown, style) = self.display_value(field);
        frame.render_widget(
            Paragraph::new(Span::styled(shown, style))
                .block(Block::default().borders(Borders::ALL).border_style(border)),
            input_area,
        );

        if focused {
            let typed_width = if self.state.values.get(field).is_empty() {
                0
            } else {
                self.display_value(field).0.width() as u16
            };
            let max_x = input_area.x + input_area.width.saturating_sub(2);
            let x = (input_area.x + 1 + typed_width).min(max_x);
            frame.set_cursor_position(Position::new(x, input_area.y + 1));
        }
    }
}

impl Component for SignupFormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = FORM_WIDTH.min(area.width);
        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(area);

        let [heading, name, email, password, hint, confirm, submit, agreement, sign_in] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(column);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Create account",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            heading,
        );

        self.render_field(frame, name, Field::Name);
        self.render_field(frame, email, Field::Email);
        self.render_field(frame, password, Field::Password);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Passwords must be at least {MIN_PASSWORD_CHARS} characters."),
                Style::default().fg(Color::DarkGray),
            )),
            hint,
        );
        self.render_field(frame, confirm, Field::ConfirmPassword);

        let button_style = if self.state.in_flight {
            Style::default().fg(Color::DarkGray)
        } else if self.state.focus == Focus::Submit {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let [_, button] = Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(submit);
        frame.render_widget(
            Paragraph::new(Span::styled(self.submit_label.to_string(), button_style))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(button_style)),
            button,
        );

        frame.render_widget(
            Paragraph::new(AGREEMENT_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            agreement,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Already have an account? "),
                Span::styled("Sign in", Style::default().fg(Color::Cyan)),
                Span::styled(" (Ctrl+L)", Style::default().fg(Color::DarkGray)),
            ])),
            sign_in,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_emits_full_value_for_focused_field() {
        let mut state = SignupFormState::new();
        state.values.name = "Ad".to_string();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('a')),
            Some(SignupEvent::Changed(Field::Name, "Ada".to_string()))
        );
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut state = SignupFormState::new();
        state.focus = Focus::Field(Field::Email);
        state.values.email = "a@é".to_string();
        assert_eq!(
            state.handle_event(&TuiEvent::Backspace),
            Some(SignupEvent::Changed(Field::Email, "a@".to_string()))
        );
    }

    #[test]
    fn test_paste_drops_newlines() {
        let mut state = SignupFormState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Paste("Ada\nLovelace".to_string())),
            Some(SignupEvent::Changed(Field::Name, "AdaLovelace".to_string()))
        );
    }

    #[test]
    fn test_focus_cycles_through_fields_and_button() {
        let mut state = SignupFormState::new();
        for _ in 0..4 {
            state.handle_event(&TuiEvent::NextField);
        }
        assert_eq!(state.focus, Focus::Submit);
        state.handle_event(&TuiEvent::NextField);
        assert_eq!(state.focus, Focus::Field(Field::Name));
        state.handle_event(&TuiEvent::PrevField);
        assert_eq!(state.focus, Focus::Submit);
    }

    #[test]
    fn test_typing_on_button_does_nothing() {
        let mut state = SignupFormState::new();
        state.focus = Focus::Submit;
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_submit_disabled_while_in_flight() {
        let mut state = SignupFormState::new();
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(SignupEvent::Submit));
        state.in_flight = true;
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_render_masks_passwords() {
        let mut state = SignupFormState::new();
        state.values.name = "Ada".to_string();
        state.values.password = "hunter22".to_string();

        let backend = TestBackend::new(80, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                SignupFormView::new(&state, "Create your account").render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Ada"));
        assert!(!text.contains("hunter22"));
        assert!(text.contains("••••••••"));
        assert!(text.contains("Create your account"));
        assert!(text.contains("Sign in"));
    }
}
