//! Logging setup with credential redaction.
//!
//! Everything written by the `tracing` fmt layer passes through
//! [`RedactingWriter`], which masks Telegram bot tokens. teloxide and reqwest
//! errors embed the full request URL (`/bot<token>/method`) in their messages.

use regex::Regex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `DEBUG_MODE` is set.
pub const DEFAULT_LOG_FILTER: &str = "politcol_bot=info,teloxide=warn,hyper=warn,reqwest=warn";

/// Regex patterns for redacting sensitive data
pub struct RedactionPatterns {
    token_url: Regex,
    token_bare: Regex,
    token_prefixed: Regex,
}

impl RedactionPatterns {
    /// Initialize all regex patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any regex pattern is invalid
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            token_url: Regex::new(r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)")?,
            token_bare: Regex::new(r"([0-9]{8,10}:[A-Za-z0-9_-]{35})")?,
            token_prefixed: Regex::new(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+")?,
        })
    }

    /// Mask every token occurrence in `input`.
    #[must_use]
    pub fn redact(&self, input: &str) -> String {
        let output = self
            .token_url
            .replace_all(input, "$1[TELEGRAM_TOKEN]$3");
        let output = self.token_bare.replace_all(&output, "[TELEGRAM_TOKEN]");
        self.token_prefixed
            .replace_all(&output, "$1[TELEGRAM_TOKEN]")
            .into_owned()
    }
}

/// Writer that redacts tokens before forwarding to `inner`.
pub struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> RedactingWriter<W> {
    const fn new(inner: W, patterns: Arc<RedactionPatterns>) -> Self {
        Self { inner, patterns }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        let redacted = self.patterns.redact(&s);
        self.inner.write_all(redacted.as_bytes())?;
        // Report the input length; the redacted text may be shorter or longer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` producing [`RedactingWriter`]s.
pub struct RedactingMakeWriter<F> {
    make_inner: F,
    patterns: Arc<RedactionPatterns>,
}

impl<F> RedactingMakeWriter<F> {
    /// Wrap a writer factory such as `std::io::stderr`.
    pub const fn new(make_inner: F, patterns: Arc<RedactionPatterns>) -> Self {
        Self {
            make_inner,
            patterns,
        }
    }
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new((self.make_inner)(), self.patterns.clone())
    }
}

/// Build the level filter.
///
/// `RUST_LOG` wins; otherwise `DEBUG_MODE=true|1` turns everything to debug.
#[must_use]
pub fn build_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug_mode {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    })
}

/// Install the global subscriber writing redacted output to stderr.
pub fn init_logging(patterns: Arc<RedactionPatterns>) {
    let make_writer = RedactingMakeWriter::new(io::stderr, patterns);

    let debug_mode = std::env::var("DEBUG_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(build_filter(debug_mode))
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer))
        .init();
}
