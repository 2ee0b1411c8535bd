//! # Core Application Logic
//!
//! This module contains Bookstall's screen logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │    API     │
//!             │  Adapter   │          │  (reqwest) │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`book_detail`]: Book screen view-state with stale-response guard
//! - [`signup`]: Signup form and validation
//! - [`view_state`]: Loading / Ready / Empty / Failed
//! - [`route`]: Navigation targets
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod book_detail;
pub mod config;
pub mod route;
pub mod signup;
pub mod state;
pub mod view_state;
