//! Stateless navigation router.
//!
//! [`Router::handle`] is a pure function of `(action, context)`: it keeps no
//! record of where a conversation was, so repeated or reordered taps can only
//! produce a stale-looking screen, never an inconsistent one.

use super::catalog::Catalog;
use super::screen::{Button, Screen};
use super::ENTRY_ACTION;
use std::borrow::Cow;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors produced while resolving an action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// The token does not name any screen (stale button, forged callback data)
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

/// How the transport should apply a rendered screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Replace the content of the message the action came from.
    EditInPlace,
    /// Post a fresh message (conversation start).
    SendNew,
}

/// What the transport has to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderAction<'a> {
    /// Show `body` with `buttons`.
    Replace {
        /// Message text
        body: Cow<'a, str>,
        /// Inline buttons, one per row
        buttons: &'a [Button],
        /// Edit or send
        delivery: Delivery,
    },
    /// Leave the current message untouched.
    Unchanged,
}

/// Render instruction for a single conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand<'a, C> {
    /// Opaque handle supplied by the transport.
    pub context: C,
    /// Render action.
    pub action: RenderAction<'a>,
}

impl<C> RenderCommand<'_, C> {
    /// Whether applying this command changes anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.action, RenderAction::Unchanged)
    }
}

/// Maps action tokens to screens of a [`Catalog`].
#[derive(Debug)]
pub struct Router {
    catalog: Catalog,
}

impl Router {
    /// Create a router over a validated catalog.
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Underlying catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve an action token to a screen.
    ///
    /// The entry action always resolves to the root screen.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownAction`] when no screen matches.
    pub fn resolve(&self, action: &str) -> Result<&Screen, RouterError> {
        if action == ENTRY_ACTION {
            return Ok(self.catalog.root());
        }
        self.catalog
            .resolve(action)
            .ok_or_else(|| RouterError::UnknownAction(action.to_string()))
    }

    /// Turn an action into a render command.
    ///
    /// Unknown actions are not an error for the caller: they produce
    /// [`RenderAction::Unchanged`] so the transport only acknowledges the tap.
    pub fn handle<C>(&self, action: &str, context: C) -> RenderCommand<'_, C> {
        let render = match self.resolve(action) {
            Ok(screen) if action == ENTRY_ACTION => RenderAction::Replace {
                body: self.entry_body(screen),
                buttons: screen.buttons(),
                delivery: Delivery::SendNew,
            },
            Ok(screen) => {
                debug!(screen = screen.key(), "Rendering screen");
                RenderAction::Replace {
                    body: Cow::Borrowed(screen.text()),
                    buttons: screen.buttons(),
                    delivery: Delivery::EditInPlace,
                }
            }
            Err(e) => {
                warn!(error = %e, "Ignoring action");
                RenderAction::Unchanged
            }
        };

        RenderCommand {
            context,
            action: render,
        }
    }

    fn entry_body<'a>(&'a self, root: &'a Screen) -> Cow<'a, str> {
        let greeting = self.catalog.greeting();
        if greeting.is_empty() {
            Cow::Borrowed(root.text())
        } else {
            Cow::Owned(format!("{greeting}\n\n{}", root.text()))
        }
    }
}
