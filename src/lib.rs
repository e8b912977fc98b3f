//! Roster - a terminal client for a user directory service
//!
//! This library exposes modules for use in integration tests.

pub mod app;
pub mod config;
pub mod connectivity;
pub mod directory;
pub mod logging;
pub mod models;
pub mod state;
pub mod ui;
pub mod view_state;
