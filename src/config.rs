//! Configuration and settings management
//!
//! Loads settings from config files and environment variables, and resolves
//! the bot token (environment first, interactive prompt second).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, IsTerminal, Write};
use thiserror::Error;

/// Name of the environment variable holding the Bot API token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Initial delay between Telegram API retries, in milliseconds.
pub const TELEGRAM_API_INITIAL_BACKOFF_MS: u64 = 500;
/// Upper bound for a single retry delay, in milliseconds.
pub const TELEGRAM_API_MAX_BACKOFF_MS: u64 = 4000;
/// Retry attempts after the first failure.
pub const TELEGRAM_API_MAX_RETRIES: usize = 3;

/// Configuration errors. Every variant stops the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config files or environment could not be read
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    /// No token configured and nobody to ask for it
    #[error(
        "BOT_TOKEN is not set. Add BOT_TOKEN=<token from @BotFather> to .env \
         or export it in the environment"
    )]
    MissingToken,
    /// Reading the token from the terminal failed
    #[error("failed to read BOT_TOKEN from terminal: {0}")]
    Prompt(#[from] io::Error),
}

/// Application settings loaded from config files and environment variables
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    /// Telegram Bot API token
    pub bot_token: Option<String>,
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Local overrides, not checked into git
            .add_source(File::with_name("config/local").required(false))
            // `APP__BOT_TOKEN=...`
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Plain `BOT_TOKEN=...`; empty values count as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Configured token, if it is present and not blank.
    #[must_use]
    pub fn configured_token(&self) -> Option<&str> {
        self.bot_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// Source of a token when none is configured.
pub trait TokenPrompt {
    /// Whether a person can answer the prompt.
    fn is_interactive(&self) -> bool;

    /// Ask for the token. `Ok(None)` means the user gave nothing.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the prompt cannot be written or read.
    fn ask(&mut self) -> io::Result<Option<String>>;
}

/// Prompt on stderr, read from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TokenPrompt for TerminalPrompt {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn ask(&mut self) -> io::Result<Option<String>> {
        let mut stderr = io::stderr();
        write!(stderr, "Введите {BOT_TOKEN_VAR} из @BotFather: ")?;
        stderr.flush()?;

        let mut line = String::new();
        // EOF (Ctrl-D) reads zero bytes and yields an empty line
        io::stdin().lock().read_line(&mut line)?;
        let token = line.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }
}

/// Resolve the bot token.
///
/// 1. A configured, non-blank token wins.
/// 2. Otherwise an interactive prompt is asked once.
/// 3. Otherwise the token is missing.
///
/// # Errors
///
/// Returns [`ConfigError::MissingToken`] when neither source yields a token,
/// or [`ConfigError::Prompt`] if the terminal cannot be read.
pub fn resolve_bot_token(
    settings: &Settings,
    prompt: &mut impl TokenPrompt,
) -> Result<String, ConfigError> {
    if let Some(token) = settings.configured_token() {
        return Ok(token.to_string());
    }

    if prompt.is_interactive() {
        if let Some(token) = prompt.ask()? {
            return Ok(token);
        }
    }

    Err(ConfigError::MissingToken)
}
