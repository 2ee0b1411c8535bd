pub mod client;
pub mod entitlement;
pub mod types;

pub use client::{ApiError, HttpStoreClient, StoreApi};
pub use entitlement::{EntitlementCheck, UnverifiedEntitlements};
pub use types::{Book, ErrorBody, SignupRequest};
