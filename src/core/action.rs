//! # Actions
//!
//! Everything that can happen in Bookstall becomes an `Action`.
//! User presses Enter on the signup form? That's `Action::SubmitSignup`.
//! The book request comes back? That's `Action::BookLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter must run. No I/O here: HTTP calls are described, never made.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, Book, SignupRequest};
use crate::core::book_detail::RequestToken;
use crate::core::route::Route;
use crate::core::signup::{Field, SIGNUP_FAILED_MESSAGE, SIGNUP_SUCCESS_MESSAGE};
use crate::core::state::{App, Notice};

pub const NOT_ENTITLED_MESSAGE: &str = "You need to purchase this book before reading";

#[derive(Debug)]
pub enum Action {
    /// Show the detail screen for a book and fetch it.
    OpenBook(String),
    /// Re-mount the book screen currently on display.
    Reload,
    BookLoaded {
        token: RequestToken,
        result: Result<Option<Book>, ApiError>,
    },
    /// "Start Reading" pressed on a loaded book.
    StartReading,
    EntitlementResolved {
        book_id: String,
        result: Result<bool, ApiError>,
    },
    OpenSignup,
    SetField(Field, String),
    SubmitSignup,
    SignupFinished(Result<(), ApiError>),
    GoToLogin,
    Back,
    DismissNotice,
    Quit,
}

/// Side effects requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchBook(RequestToken),
    Signup(SignupRequest),
    CheckEntitlement { book_id: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::OpenBook(book_id) => {
            app.navigate(Route::BookDetail(book_id.clone()));
            mount_book(app, &book_id)
        }
        Action::Reload => match app.displayed_book_id().map(str::to_string) {
            Some(book_id) => mount_book(app, &book_id),
            None => Effect::None,
        },
        Action::BookLoaded { token, result } => {
            app.book.resolve(&token, result);
            Effect::None
        }
        Action::StartReading => {
            let Some(book_id) = app.displayed_book_id() else {
                return Effect::None;
            };
            if app.book.book().is_none() || app.book.book_id != book_id {
                debug!("Start Reading ignored: book {book_id} is not loaded");
                return Effect::None;
            }
            Effect::CheckEntitlement {
                book_id: book_id.to_string(),
            }
        }
        Action::EntitlementResolved { book_id, result } => {
            if app.displayed_book_id() != Some(book_id.as_str()) {
                info!("Ignoring entitlement answer for {book_id}: no longer displayed");
                return Effect::None;
            }
            if app.book.book().is_none() {
                info!("Ignoring entitlement answer for {book_id}: book not loaded");
                return Effect::None;
            }
            match result {
                Ok(true) => app.navigate(Route::Reader(book_id)),
                Ok(false) => {
                    info!("Reading {book_id} refused: not entitled");
                    app.notice = Some(Notice::error(NOT_ENTITLED_MESSAGE));
                }
                Err(e) => {
                    warn!("Entitlement check for {book_id} failed: {e}");
                    app.notice = Some(Notice::error(format!("Could not verify ownership: {e}")));
                }
            }
            Effect::None
        }
        Action::OpenSignup => {
            app.navigate(Route::Signup);
            Effect::None
        }
        Action::SetField(field, value) => {
            app.signup.form.set(field, value);
            Effect::None
        }
        Action::SubmitSignup => {
            if app.signup.in_flight {
                debug!("Signup already in flight, ignoring submit");
                return Effect::None;
            }
            match app.signup.form.validate() {
                Ok(request) => {
                    app.signup.in_flight = true;
                    app.status_message = "Creating account...".to_string();
                    Effect::Signup(request)
                }
                Err(e) => {
                    info!("Signup rejected locally: {e}");
                    app.notice = Some(Notice::error(e.to_string()));
                    Effect::None
                }
            }
        }
        Action::SignupFinished(result) => {
            app.signup.in_flight = false;
            app.status_message.clear();
            match result {
                Ok(()) => {
                    info!("Account created");
                    app.notice = Some(Notice::info(SIGNUP_SUCCESS_MESSAGE));
                    app.signup.form.clear();
                    app.navigate(Route::Login);
                }
                Err(ApiError::Status {
                    message: Some(message),
                    ..
                }) => {
                    app.notice = Some(Notice::error(message));
                }
                Err(e) => {
                    warn!("Signup failed: {e}");
                    app.notice = Some(Notice::error(SIGNUP_FAILED_MESSAGE));
                }
            }
            Effect::None
        }
        Action::GoToLogin => {
            app.navigate(Route::Login);
            Effect::None
        }
        Action::Back => {
            let Some(previous) = app.history.pop() else {
                return Effect::None;
            };
            info!("Back {} -> {}", app.route.path(), previous.path());
            app.route = previous;
            match app.displayed_book_id().map(str::to_string) {
                Some(book_id) => mount_book(app, &book_id),
                None => Effect::None,
            }
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn mount_book(app: &mut App, book_id: &str) -> Effect {
    match app.book.mount(book_id) {
        Some(token) => Effect::FetchBook(token),
        None => Effect::None,
    }
}
