use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BookView, NoticePopup, Placeholder, SignupFormView, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.route.path(), app.status_message.clone()).render(frame, title_area);

    match &app.route {
        Route::BookDetail(_) => {
            BookView::new(&app.book, &mut tui.description_scroll).render(frame, main_area);
        }
        Route::Signup => {
            SignupFormView::new(&tui.signup_form, app.signup.submit_label())
                .render(frame, main_area);
        }
        Route::Reader(book_id) => {
            Placeholder::new("Reader", format!("Opening book {book_id}")).render(frame, main_area);
        }
        Route::Login => {
            Placeholder::new("Sign in", "Log in with your new account").render(frame, main_area);
        }
    }

    frame.render_widget(
        Span::styled(help_text(&app.route), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(notice) = &app.notice {
        NoticePopup::new(notice).render(frame, main_area);
    }
}

fn help_text(route: &Route) -> &'static str {
    match route {
        Route::BookDetail(_) => {
            " Enter Start Reading  ↑/↓ Scroll  Ctrl+R Reload  s Sign up  Esc Back  q Quit"
        }
        Route::Signup => " Tab/↑/↓ Move  Enter Create account  Ctrl+L Sign in  Esc Back  Ctrl+C Quit",
        Route::Reader(_) | Route::Login => " Esc Back  q Quit",
    }
}
