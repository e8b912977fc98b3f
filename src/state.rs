//! Data-loading state machine for the list fetch lifecycle.

use crate::models::User;

/// Current position in the fetch lifecycle.
///
/// Exactly one state is active at a time. `Loaded` always carries the
/// collection (possibly empty) and no message; `Failed` always carries a
/// message and no collection; a failed fetch discards whatever was loaded
/// before it.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Loading,
    Loaded(Vec<User>),
    Failed(String),
}

/// Finite-state controller for the user list fetch.
///
/// ```text
/// Idle --mount--> Loading --ok--> Loaded --refresh--> Loading
///                    |                                   ^
///                    +-----err--> Failed --refresh-------+
/// ```
///
/// There is no terminal state; the machine re-enters `Loading` on every
/// refresh. A refresh while `Loading` is a no-op, which keeps at most one
/// fetch outstanding.
#[derive(Debug)]
pub struct FetchMachine {
    state: LoadingState,
}

impl FetchMachine {
    pub fn new() -> Self {
        Self {
            state: LoadingState::Idle,
        }
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadingState::Loading)
    }

    /// Enter the fetch lifecycle. Returns whether a fetch must be
    /// dispatched; the caller owns the actual dispatch.
    #[must_use]
    pub fn mount(&mut self) -> bool {
        match self.state {
            LoadingState::Idle => {
                self.state = LoadingState::Loading;
                true
            }
            _ => false,
        }
    }

    /// User-initiated refresh. Returns whether a fetch must be dispatched.
    ///
    /// Guarded: while a fetch is outstanding the trigger is ignored, so a
    /// stale response can never overwrite a newer one.
    #[must_use]
    pub fn refresh(&mut self) -> bool {
        match self.state {
            LoadingState::Loading => false,
            _ => {
                self.state = LoadingState::Loading;
                true
            }
        }
    }

    /// The outstanding fetch resolved with a collection.
    pub fn resolve_ok(&mut self, users: Vec<User>) {
        if !self.is_loading() {
            tracing::warn!(state = ?self.state, "fetch resolution outside Loading, discarded");
            return;
        }
        self.state = LoadingState::Loaded(users);
    }

    /// The outstanding fetch resolved with a failure message.
    pub fn resolve_err(&mut self, message: String) {
        if !self.is_loading() {
            tracing::warn!(state = ?self.state, "fetch resolution outside Loading, discarded");
            return;
        }
        debug_assert!(!message.is_empty());
        self.state = LoadingState::Failed(message);
    }
}

impl Default for FetchMachine {
    fn default() -> Self {
        Self::new()
    }
}
