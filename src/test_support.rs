//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, Book, EntitlementCheck, SignupRequest, StoreApi};

/// A store that answers every call with a canned result and records what
/// it was asked.
pub struct ScriptedStore {
    pub book: Result<Option<Book>, ApiError>,
    pub signup: Result<(), ApiError>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedStore {
    pub fn new(book: Result<Option<Book>, ApiError>, signup: Result<(), ApiError>) -> Self {
        Self {
            book,
            signup,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl StoreApi for ScriptedStore {
    async fn fetch_book(&self, book_id: &str) -> Result<Option<Book>, ApiError> {
        self.record(format!("fetch_book {book_id}"));
        self.book.clone()
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.record(format!("signup {}", request.email));
        self.signup.clone()
    }
}

/// Answers every entitlement query the same way.
pub struct FixedEntitlements(pub Result<bool, ApiError>);

#[async_trait]
impl EntitlementCheck for FixedEntitlements {
    async fn owns(&self, _book_id: &str) -> Result<bool, ApiError> {
        self.0.clone()
    }
}

/// Creates a test App whose collaborators return empty successes.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(ScriptedStore::new(Ok(None), Ok(()))),
        Arc::new(FixedEntitlements(Ok(true))),
    )
}
