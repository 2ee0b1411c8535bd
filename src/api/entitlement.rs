//! Entitlement checks run before opening a book in the reader.
//!
//! The storefront exposes no ownership endpoint yet, so the only shipped
//! implementation grants access unconditionally. Screens still go through
//! the trait, which keeps the precondition in one place.

use async_trait::async_trait;
use log::debug;

use super::client::ApiError;

#[async_trait]
pub trait EntitlementCheck: Send + Sync {
    /// Whether the current user may read `book_id`.
    async fn owns(&self, book_id: &str) -> Result<bool, ApiError>;
}

/// Grants every book. Mirrors the storefront's current behaviour.
pub struct UnverifiedEntitlements;

#[async_trait]
impl EntitlementCheck for UnverifiedEntitlements {
    async fn owns(&self, book_id: &str) -> Result<bool, ApiError> {
        debug!("Entitlement for {book_id} not verified, granting");
        Ok(true)
    }
}
