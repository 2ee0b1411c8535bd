//! # View State
//!
//! The presentation modes a fetching screen can be in. Exactly one is
//! observable at a time.
//!
//! ```text
//!            ┌──► Ready(data)
//! Loading ───┼──► Empty
//!            └──► Failed(message)
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Empty,
    Failed(String),
}

impl<T> ViewState<T> {
    /// Ready, Empty and Failed end a fetch attempt.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Empty => "empty",
            ViewState::Failed(_) => "failed",
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}
