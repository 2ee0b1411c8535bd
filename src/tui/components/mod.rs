//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: route path and status line
//! - `BookView`: the book detail screen for any view-state
//! - `NoticePopup`: acknowledgement overlay
//! - `Placeholder`: reader and login landing screens
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SignupFormState`: focus handling and keystroke → field events for the
//!   signup screen, rendered through the transient `SignupFormView`
//!
//! Components receive external data as props, never by reaching into `App`.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TitleBar::new(app.route.path(), app.status_message.clone()).render(frame, area);
//! ```

pub mod book_view;
pub mod notice;
pub mod placeholder;
pub mod signup_form;
mod title_bar;

pub use book_view::BookView;
pub use notice::NoticePopup;
pub use placeholder::Placeholder;
pub use signup_form::{SignupEvent, SignupFormState, SignupFormView};
pub use title_bar::TitleBar;
