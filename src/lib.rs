#![deny(missing_docs)]
//! Politcol menu bot
//!
//! A Telegram bot for the Salamat Mukashev Polytechnic College that shows a
//! fixed tree of informational screens through inline buttons.

/// Telegram bot implementation
pub mod bot;
/// Configuration management
pub mod config;
/// Logging setup with token redaction
pub mod logging;
/// Screen catalog and navigation router
pub mod menu;
/// Telegram runtime entrypoint
pub mod runner;
/// Utility functions
pub mod utils;
