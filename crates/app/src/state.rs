//! Lifecycle state of the rendered book list.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use view_model::BookView;

/// Where the list is in its refresh lifecycle.
///
/// ```text
/// Idle -> Loading -> Ready
///            |  ^       |
///            v  |       v
///           Failed   Loading ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never refreshed
    Idle,
    Loading,
    Ready,
    /// Last refresh failed; `books` still holds the previous result
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the rendering layer needs, owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct RefreshState {
    pub phase: Phase,
    pub books: Arc<Vec<BookView>>,
    pub last_error: Option<String>,
    pub last_refreshed: Option<Instant>,
}

impl RefreshState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            books: Arc::new(Vec::new()),
            last_error: None,
            last_refreshed: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

impl Default for RefreshState {
    fn default() -> Self {
        Self::new()
    }
}
