//! # Application State
//!
//! Core state for Bookstall. Domain only: no terminal types live here.
//!
//! ```text
//! App
//! ├── store: Arc<dyn StoreApi>               // storefront HTTP API
//! ├── entitlements: Arc<dyn EntitlementCheck>
//! ├── route: Route                           // screen on display
//! ├── history: Vec<Route>                    // back stack
//! ├── book: BookDetailState                  // book screen view-state
//! ├── signup: SignupState                    // signup form + in-flight flag
//! ├── notice: Option<Notice>                 // pop-up message
//! └── status_message: String                 // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use log::info;

use crate::api::{EntitlementCheck, StoreApi};
use crate::core::book_detail::BookDetailState;
use crate::core::route::Route;
use crate::core::signup::SignupState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

pub struct App {
    pub store: Arc<dyn StoreApi>,
    pub entitlements: Arc<dyn EntitlementCheck>,
    pub route: Route,
    pub history: Vec<Route>,
    pub book: BookDetailState,
    pub signup: SignupState,
    pub notice: Option<Notice>,
    pub status_message: String,
}

impl App {
    pub fn new(store: Arc<dyn StoreApi>, entitlements: Arc<dyn EntitlementCheck>) -> Self {
        Self {
            store,
            entitlements,
            route: Route::Signup,
            history: Vec::new(),
            book: BookDetailState::new(),
            signup: SignupState::default(),
            notice: None,
            status_message: String::new(),
        }
    }

    /// Moves to `route`, remembering where we came from.
    /// Navigating to the route already on display is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        info!("Navigating {} -> {}", self.route.path(), route.path());
        let previous = std::mem::replace(&mut self.route, route);
        self.history.push(previous);
    }

    /// The book id of the detail screen, if it is the one on display.
    pub fn displayed_book_id(&self) -> Option<&str> {
        match &self.route {
            Route::BookDetail(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.route, Route::Signup);
        assert!(app.history.is_empty());
        assert!(app.notice.is_none());
        assert!(!app.signup.in_flight);
    }

    #[test]
    fn test_navigate_pushes_history() {
        let mut app = test_app();
        app.navigate(Route::Login);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.history, vec![Route::Signup]);
    }

    #[test]
    fn test_navigate_to_same_route_is_noop() {
        let mut app = test_app();
        app.navigate(Route::Signup);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_displayed_book_id() {
        let mut app = test_app();
        assert_eq!(app.displayed_book_id(), None);
        app.navigate(Route::BookDetail("42".to_string()));
        assert_eq!(app.displayed_book_id(), Some("42"));
    }
}
