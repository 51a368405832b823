//! Immutable screen catalog.
//!
//! The catalog is the whole transition table of the menu: screen keys are the
//! states and navigation tokens are the transitions. [`CatalogBuilder::build`]
//! checks that the table is closed before anything else can run, so a dangling
//! button is a start-up failure instead of a silent dead tap.

use super::screen::Screen;
use super::{ENTRY_ACTION, MAX_ACTION_LEN};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

/// Catalog configuration errors. All of them are fatal at start-up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A navigation button points at a screen that does not exist
    #[error("screen `{screen}` has a button pointing to unknown screen `{target}`")]
    DanglingAction {
        /// Screen that owns the button
        screen: String,
        /// Token without a matching screen
        target: String,
    },
    /// The same key was registered twice
    #[error("screen `{0}` is defined more than once")]
    DuplicateScreen(String),
    /// The declared root screen was never registered
    #[error("root screen `{0}` is not defined")]
    MissingRoot(String),
    /// A screen key collides with the entry action
    #[error("screen key `{0}` is reserved for the entry action")]
    ReservedKey(String),
    /// A navigation token does not fit into Telegram's `callback_data`
    #[error(
        "action `{target}` on screen `{screen}` is {len} bytes long (limit {})",
        MAX_ACTION_LEN
    )]
    ActionTooLong {
        /// Screen that owns the button
        screen: String,
        /// Offending token
        target: String,
        /// Token length in bytes
        len: usize,
    },
    /// A link button target could not be parsed as an absolute URL
    #[error("invalid link `{url}`: {reason}")]
    InvalidLink {
        /// Raw URL as authored
        url: String,
        /// Parser message
        reason: String,
    },
}

/// Read-only collection of screens plus the root and greeting.
#[derive(Debug, Clone)]
pub struct Catalog {
    screens: Vec<Screen>,
    index: HashMap<String, usize>,
    root: String,
    greeting: String,
}

impl Catalog {
    /// Start building a catalog whose initial state is `root`.
    #[must_use]
    pub fn builder(root: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder {
            root: root.into(),
            greeting: String::new(),
            screens: Vec::new(),
        }
    }

    /// Look up a screen by key.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Screen> {
        self.index.get(key).map(|&i| &self.screens[i])
    }

    /// The root screen.
    #[must_use]
    pub fn root(&self) -> &Screen {
        // `build` guarantees the root is indexed
        &self.screens[self.index[&self.root]]
    }

    /// Welcome preamble shown on the entry action. May be empty.
    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Screen keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.screens.iter().map(Screen::key)
    }

    /// All screens in registration order.
    #[must_use]
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Number of screens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Whether the catalog has no screens. Never true for a built catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Shortest number of navigation hops from `key` to the root.
    ///
    /// Returns `Some(0)` for the root itself and `None` when the key is
    /// unknown or the root cannot be reached.
    #[must_use]
    pub fn distance_to_root(&self, key: &str) -> Option<usize> {
        self.resolve(key)?;

        let mut seen = HashSet::from([key]);
        let mut queue = VecDeque::from([(key, 0usize)]);
        while let Some((current, hops)) = queue.pop_front() {
            if current == self.root {
                return Some(hops);
            }
            let Some(screen) = self.resolve(current) else {
                continue;
            };
            for next in screen.navigation_targets() {
                if seen.insert(next) {
                    queue.push_back((next, hops + 1));
                }
            }
        }
        None
    }
}

/// Collects screens and validates them into a [`Catalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    root: String,
    greeting: String,
    screens: Vec<Screen>,
}

impl CatalogBuilder {
    /// Set the entry greeting.
    #[must_use]
    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Register a screen.
    #[must_use]
    pub fn screen(mut self, screen: Screen) -> Self {
        self.screens.push(screen);
        self
    }

    /// Validate the transition table and freeze it.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found: duplicate or reserved keys,
    /// a missing root, oversized tokens, or navigation buttons whose target is
    /// not a registered screen.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut index = HashMap::with_capacity(self.screens.len());
        for (i, screen) in self.screens.iter().enumerate() {
            if screen.key() == ENTRY_ACTION {
                return Err(CatalogError::ReservedKey(screen.key().to_string()));
            }
            if index.insert(screen.key().to_string(), i).is_some() {
                return Err(CatalogError::DuplicateScreen(screen.key().to_string()));
            }
        }

        if !index.contains_key(&self.root) {
            return Err(CatalogError::MissingRoot(self.root));
        }

        for screen in &self.screens {
            for target in screen.navigation_targets() {
                if target.len() > MAX_ACTION_LEN {
                    return Err(CatalogError::ActionTooLong {
                        screen: screen.key().to_string(),
                        target: target.to_string(),
                        len: target.len(),
                    });
                }
                if !index.contains_key(target) {
                    return Err(CatalogError::DanglingAction {
                        screen: screen.key().to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }

        Ok(Catalog {
            screens: self.screens,
            index,
            root: self.root,
            greeting: self.greeting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_screens() -> CatalogBuilder {
        Catalog::builder("home")
            .screen(Screen::new("home", "Home").navigate("Go", "leaf"))
            .screen(Screen::new("leaf", "Leaf").navigate("Back", "home"))
    }

    #[test]
    fn test_build_and_resolve() {
        let catalog = two_screens().greeting("Hi").build().expect("valid catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.root().key(), "home");
        assert_eq!(catalog.greeting(), "Hi");
        assert_eq!(catalog.resolve("leaf").map(Screen::text), Some("Leaf"));
        assert!(catalog.resolve("missing").is_none());
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["home", "leaf"]);
    }

    #[test]
    fn test_dangling_action_rejected() {
        let err = two_screens()
            .screen(Screen::new("broken", "x").navigate("Nowhere", "ghost"))
            .build()
            .expect_err("dangling token must fail");
        assert_eq!(
            err,
            CatalogError::DanglingAction {
                screen: "broken".to_string(),
                target: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_screen_rejected() {
        let err = two_screens()
            .screen(Screen::new("leaf", "again"))
            .build()
            .expect_err("duplicate key must fail");
        assert_eq!(err, CatalogError::DuplicateScreen("leaf".to_string()));
    }

    #[test]
    fn test_missing_root_rejected() {
        let err = Catalog::builder("nope")
            .screen(Screen::new("home", "Home"))
            .build()
            .expect_err("missing root must fail");
        assert_eq!(err, CatalogError::MissingRoot("nope".to_string()));
    }

    #[test]
    fn test_entry_action_is_reserved() {
        let err = two_screens()
            .screen(Screen::new(ENTRY_ACTION, "clash"))
            .build()
            .expect_err("reserved key must fail");
        assert_eq!(err, CatalogError::ReservedKey(ENTRY_ACTION.to_string()));
    }

    #[test]
    fn test_oversized_action_rejected() {
        let long = "x".repeat(MAX_ACTION_LEN + 1);
        let err = two_screens()
            .screen(Screen::new(long.clone(), "too long"))
            .screen(Screen::new("pointer", "p").navigate("Far", long.clone()))
            .build()
            .expect_err("oversized token must fail");
        assert!(matches!(err, CatalogError::ActionTooLong { len, .. } if len == long.len()));
    }

    #[test]
    fn test_distance_to_root() {
        let catalog = two_screens()
            .screen(Screen::new("deep", "d").navigate("Up", "leaf"))
            .screen(Screen::new("island", "i"))
            .build()
            .expect("valid catalog");

        assert_eq!(catalog.distance_to_root("home"), Some(0));
        assert_eq!(catalog.distance_to_root("leaf"), Some(1));
        assert_eq!(catalog.distance_to_root("deep"), Some(2));
        assert_eq!(catalog.distance_to_root("island"), None);
        assert_eq!(catalog.distance_to_root("unknown"), None);
    }
}
