//! View selection for the roster screen.
//!
//! Pure mapping from the machine and gate state to the view variant the
//! renderer shows. No transport, no terminal, unit-testable on its own.

use crate::connectivity::ConnectivityState;
use crate::models::User;
use crate::state::LoadingState;

/// What the renderer shows this frame. Variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewVariant<'a> {
    /// Health probe still outstanding; the data subsystem is not mounted.
    Checking,
    /// Probe failed; the only recovery is a session restart.
    Disconnected,
    /// Fetch in flight.
    Loading,
    /// Backend returned an empty collection.
    Empty,
    /// Backend returned users, server order preserved.
    Roster(&'a [User]),
    /// Fetch failed with the normalized message.
    Failed(&'a str),
}

/// Select the view for the current frame. Total over every state
/// combination: while the gate is unresolved the machine is still `Idle`,
/// but the mapping does not rely on that.
pub fn select_view<'a>(
    loading: &'a LoadingState,
    connectivity: ConnectivityState,
) -> ViewVariant<'a> {
    match connectivity {
        ConnectivityState::Unknown => ViewVariant::Checking,
        ConnectivityState::Disconnected => ViewVariant::Disconnected,
        ConnectivityState::Connected => match loading {
            // Idle only lasts until the mount dispatch on the same turn.
            LoadingState::Idle | LoadingState::Loading => ViewVariant::Loading,
            LoadingState::Loaded(users) if users.is_empty() => ViewVariant::Empty,
            LoadingState::Loaded(users) => ViewVariant::Roster(users),
            LoadingState::Failed(message) => ViewVariant::Failed(message),
        },
    }
}

/// Identity badge for a user row: first character of the name, uppercased.
/// Deterministic; a nameless user gets `?`.
pub fn initial_badge(name: &str) -> char {
    name.chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}
