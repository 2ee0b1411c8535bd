//! # Book Detail Screen State
//!
//! Holds the view-state for one book and guards it against stale responses.
//!
//! Every mount bumps a generation counter and hands out a [`RequestToken`].
//! A response only lands if its token still names the current generation
//! and book, and only while the screen is still `Loading`. That gives each
//! mount at most one terminal transition, and a slow response for a book
//! the user already left can never overwrite the one on screen.

use log::{debug, info, warn};

use crate::api::{ApiError, Book};
use crate::core::view_state::ViewState;

/// Shown when the server answers with a non-success status.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch book data";
/// Shown when the screen is mounted without a usable identifier.
pub const MISSING_ID_MESSAGE: &str = "Book identifier is missing";

/// Identifies the request issued for one mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub generation: u64,
    pub book_id: String,
}

#[derive(Debug, Default)]
pub struct BookDetailState {
    pub book_id: String,
    pub view: ViewState<Book>,
    generation: u64,
}

impl BookDetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh fetch cycle for `book_id`.
    ///
    /// Returns the token to tag the outbound request with, or `None` when no
    /// request should be made because the identifier is blank.
    pub fn mount(&mut self, book_id: &str) -> Option<RequestToken> {
        self.generation += 1;
        self.book_id = book_id.to_string();

        if book_id.trim().is_empty() {
            warn!("Book screen mounted without an identifier");
            self.view = ViewState::Failed(MISSING_ID_MESSAGE.to_string());
            return None;
        }

        self.view = ViewState::Loading;
        debug!("Mounted book {} (generation {})", book_id, self.generation);
        Some(RequestToken {
            generation: self.generation,
            book_id: self.book_id.clone(),
        })
    }

    /// Applies a fetch result. Returns `true` if the view changed.
    pub fn resolve(&mut self, token: &RequestToken, result: Result<Option<Book>, ApiError>) -> bool {
        if token.generation != self.generation || token.book_id != self.book_id {
            info!(
                "Discarding stale response for {} (generation {}, current {})",
                token.book_id, token.generation, self.generation
            );
            return false;
        }
        if self.view.is_terminal() {
            debug!("Book {} already {}, ignoring result", self.book_id, self.view.label());
            return false;
        }

        self.view = match result {
            Ok(Some(book)) => ViewState::Ready(book),
            Ok(None) => ViewState::Empty,
            Err(e) => {
                warn!("Book {} failed to load: {}", self.book_id, e);
                ViewState::Failed(failure_message(&e))
            }
        };
        debug!("Book {} is now {}", self.book_id, self.view.label());
        true
    }

    pub fn book(&self) -> Option<&Book> {
        self.view.ready()
    }
}

/// User-visible text for a failed fetch.
pub fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { .. } => FETCH_FAILED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: "42".to_string(),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mount_starts_loading() {
        let mut state = BookDetailState::new();
        let token = state.mount("42").unwrap();
        assert_eq!(token.book_id, "42");
        assert_eq!(state.view, ViewState::Loading);
    }

    #[test]
    fn test_loading_to_ready() {
        let mut state = BookDetailState::new();
        let token = state.mount("42").unwrap();
        assert!(state.resolve(&token, Ok(Some(dune()))));
        assert_eq!(state.book().map(|b| b.title.as_str()), Some("Dune"));
    }

    #[test]
    fn test_loading_to_empty() {
        let mut state = BookDetailState::new();
        let token = state.mount("42").unwrap();
        assert!(state.resolve(&token, Ok(None)));
        assert_eq!(state.view, ViewState::Empty);
    }

    #[test]
    fn test_http_failure_uses_generic_message() {
        let mut state = BookDetailState::new();
        let token = state.mount("42").unwrap();
        let err = ApiError::Status {
            status: 404,
            message: None,
        };
        assert!(state.resolve(&token, Err(err)));
        assert_eq!(state.view, ViewState::Failed(FETCH_FAILED_MESSAGE.to_string()));
    }

    #[test]
    fn test_network_failure_carries_error_text() {
        let mut state = BookDetailState::new();
        let token = state.mount("42").unwrap();
        let err = ApiError::Network("connection refused".to_string());
        state.resolve(&token, Err(err));
        assert_eq!(
            state.view,
            ViewState::Failed("network error: connection refused".to_string())
        );
    }

    #[test]
    fn test_only_one_terminal_state_per_mount() {
        let mut state = BookDetailState::new();
        let token = state.mount("42").unwrap();
        assert!(state.resolve(&token, Ok(Some(dune()))));
        assert!(!state.resolve(&token, Ok(None)));
        assert!(!state.resolve(&token, Err(ApiError::Network("late".to_string()))));
        assert!(matches!(state.view, ViewState::Ready(_)));
    }

    #[test]
    fn test_stale_response_for_previous_book_is_discarded() {
        let mut state = BookDetailState::new();
        let old = state.mount("1").unwrap();
        let current = state.mount("42").unwrap();

        assert!(!state.resolve(&old, Ok(None)));
        assert_eq!(state.view, ViewState::Loading);

        assert!(state.resolve(&current, Ok(Some(dune()))));
        assert!(matches!(state.view, ViewState::Ready(_)));
    }

    #[test]
    fn test_remount_of_same_book_discards_earlier_request() {
        let mut state = BookDetailState::new();
        let first = state.mount("42").unwrap();
        let second = state.mount("42").unwrap();
        assert_ne!(first, second);
        assert!(!state.resolve(&first, Ok(None)));
        assert!(state.resolve(&second, Ok(None)));
    }

    #[test]
    fn test_blank_identifier_fails_without_request() {
        let mut state = BookDetailState::new();
        assert!(state.mount("   ").is_none());
        assert_eq!(state.view, ViewState::Failed(MISSING_ID_MESSAGE.to_string()));
    }
}
