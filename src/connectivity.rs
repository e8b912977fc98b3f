//! Session connectivity gate.
//!
//! Decides once, at session start, whether the data-loading subsystem is
//! mounted at all. There is no re-probing: the only way out of
//! `Disconnected` is a full session restart, which builds a fresh gate.

/// Backend reachability as decided by the startup health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    /// Probe still outstanding.
    Unknown,
    /// Probe succeeded; the data subsystem owns all further data concerns.
    Connected,
    /// Probe failed; only a session restart recovers.
    Disconnected,
}

/// One-shot connectivity decision, owned by exactly one session.
#[derive(Debug)]
pub struct ConnectivityGate {
    state: ConnectivityState,
}

impl ConnectivityGate {
    pub fn new() -> Self {
        Self {
            state: ConnectivityState::Unknown,
        }
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state != ConnectivityState::Unknown
    }

    /// Record the probe outcome. The gate resolves exactly once per
    /// session; a repeat call is ignored.
    pub fn resolve(&mut self, healthy: bool) {
        if self.state != ConnectivityState::Unknown {
            tracing::warn!(
                current = ?self.state,
                "connectivity already resolved, ignoring probe result"
            );
            return;
        }

        self.state = if healthy {
            ConnectivityState::Connected
        } else {
            ConnectivityState::Disconnected
        };
        tracing::info!(state = ?self.state, "connectivity resolved");
    }
}

impl Default for ConnectivityGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_starts_unknown() {
        let gate = ConnectivityGate::new();
        assert_eq!(gate.state(), ConnectivityState::Unknown);
        assert!(!gate.is_resolved());
    }

    #[test]
    fn test_healthy_probe_resolves_connected() {
        let mut gate = ConnectivityGate::new();
        gate.resolve(true);
        assert_eq!(gate.state(), ConnectivityState::Connected);
        assert!(gate.is_resolved());
    }

    #[test]
    fn test_failed_probe_resolves_disconnected() {
        let mut gate = ConnectivityGate::new();
        gate.resolve(false);
        assert_eq!(gate.state(), ConnectivityState::Disconnected);
    }

    #[test]
    fn test_gate_resolves_exactly_once() {
        let mut gate = ConnectivityGate::new();
        gate.resolve(false);
        gate.resolve(true);
        assert_eq!(gate.state(), ConnectivityState::Disconnected);
    }

    #[test]
    fn test_independent_sessions_have_independent_gates() {
        let mut first = ConnectivityGate::new();
        first.resolve(false);

        let second = ConnectivityGate::new();
        assert_eq!(second.state(), ConnectivityState::Unknown);
    }
}
