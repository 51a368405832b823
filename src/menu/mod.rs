//! Navigation core: static screens and the router that moves between them.
//!
//! Nothing in here knows about Telegram. The transport hands an action token
//! and an opaque conversation handle to [`Router::handle`] and applies the
//! returned [`RenderCommand`].

pub mod catalog;
pub mod content;
pub mod router;
pub mod screen;

pub use catalog::{Catalog, CatalogBuilder, CatalogError};
pub use router::{Delivery, RenderAction, RenderCommand, Router, RouterError};
pub use screen::{Button, ButtonAction, ListingOrder, Screen};

/// Action emitted when a conversation starts (`/start`).
pub const ENTRY_ACTION: &str = "start";

/// Telegram limit for `callback_data`, in bytes.
pub const MAX_ACTION_LEN: usize = 64;
