//! Application state and async plumbing for the TUI.
//!
//! [`App`] owns the connectivity gate, the fetch state machine and the
//! message channel that spawned tasks report back on. All state
//! transitions happen on the event-loop thread in message-arrival order;
//! the spawned tasks only ever send an [`AppMessage`].

use crate::connectivity::{ConnectivityGate, ConnectivityState};
use crate::directory::DirectoryClient;
use crate::models::User;
use crate::state::FetchMachine;

use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Messages received from async operations.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Startup health probe resolved.
    HealthResolved(bool),
    /// User list fetched.
    UsersLoaded(Vec<User>),
    /// User list fetch failed, with the normalized user-facing message.
    UsersLoadError(String),
}

/// How a finished event loop wants the outer session loop to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Quit,
    /// Tear the session down and build a fresh one (new gate, new machine,
    /// new probe). Requested from the disconnected screen.
    Restart,
}

/// Per-session application state.
pub struct App {
    pub gate: ConnectivityGate,
    pub machine: FetchMachine,
    client: Arc<DirectoryClient>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop, which needs ownership for `select!`.
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub needs_redraw: bool,
    /// Monotonic UI tick, drives the loading spinner.
    pub tick_count: u64,
    /// When the current collection was stored.
    pub updated_at: Option<DateTime<Local>>,
}

impl App {
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            gate: ConnectivityGate::new(),
            machine: FetchMachine::new(),
            client,
            message_tx,
            message_rx: Some(message_rx),
            needs_redraw: true,
            tick_count: 0,
            updated_at: None,
        }
    }

    /// Kick off the startup health probe. The outcome arrives as
    /// [`AppMessage::HealthResolved`].
    pub fn start_probe(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let healthy = client.check_health().await;
            let _ = tx.send(AppMessage::HealthResolved(healthy));
        });
    }

    /// User pressed the refresh key. The machine decides whether a fetch
    /// is actually dispatched.
    pub fn request_refresh(&mut self) {
        if self.machine.refresh() {
            self.spawn_fetch();
        }
        self.mark_dirty();
    }

    /// Apply one message from the channel.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::HealthResolved(healthy) => {
                self.gate.resolve(healthy);
                if self.gate.state() == ConnectivityState::Connected && self.machine.mount() {
                    self.spawn_fetch();
                }
            }
            AppMessage::UsersLoaded(users) => {
                self.machine.resolve_ok(users);
                self.updated_at = Some(Local::now());
            }
            AppMessage::UsersLoadError(message) => {
                self.machine.resolve_err(message);
            }
        }
        self.mark_dirty();
    }

    fn spawn_fetch(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match client.list_users().await {
                Ok(users) => {
                    let _ = tx.send(AppMessage::UsersLoaded(users));
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::UsersLoadError(err.to_string()));
                }
            }
        });
    }

    /// Periodic UI tick. Animated views redraw on every tick.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if !self.gate.is_resolved() || self.machine.is_loading() {
            self.mark_dirty();
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }
}
