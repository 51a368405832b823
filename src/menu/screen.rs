//! Screen and button definitions.
//!
//! A [`Screen`] is a named, static unit of display content: body text plus an
//! ordered list of [`Button`]s. Screens are built once at start-up and only
//! read afterwards.

use reqwest::Url;

/// What happens when a button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Switch to another screen; the token is sent back as `callback_data`.
    Navigate(String),
    /// Open an external URL. Never resolved by the router.
    Link(Url),
}

/// A single inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    label: String,
    action: ButtonAction,
}

impl Button {
    /// Create a button that navigates to `target`.
    #[must_use]
    pub fn navigate(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Navigate(target.into()),
        }
    }

    /// Create a button that opens an external URL.
    #[must_use]
    pub fn link(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Link(url),
        }
    }

    /// Button caption.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Button action.
    #[must_use]
    pub const fn action(&self) -> &ButtonAction {
        &self.action
    }

    /// Navigation token, if this is a navigation button.
    #[must_use]
    pub fn navigation_target(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Navigate(target) => Some(target.as_str()),
            ButtonAction::Link(_) => None,
        }
    }
}

/// A named screen: body text and buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    key: String,
    text: String,
    buttons: Vec<Button>,
}

impl Screen {
    /// Create a screen without buttons.
    #[must_use]
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// Create a screen whose body is a formatted listing.
    ///
    /// See [`format_listing`] for the exact layout.
    #[must_use]
    pub fn listing<S: AsRef<str>>(
        key: impl Into<String>,
        heading: &str,
        entries: &[S],
        footer: Option<&str>,
        order: ListingOrder,
    ) -> Self {
        Self::new(key, format_listing(heading, entries, footer, order))
    }

    /// Append a navigation button.
    #[must_use]
    pub fn navigate(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.buttons.push(Button::navigate(label, target));
        self
    }

    /// Append an external link button.
    #[must_use]
    pub fn link(mut self, label: impl Into<String>, url: Url) -> Self {
        self.buttons.push(Button::link(label, url));
        self
    }

    /// Stable identifier of the screen.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Buttons in display order.
    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Iterate over the navigation tokens this screen can emit.
    pub fn navigation_targets(&self) -> impl Iterator<Item = &str> {
        self.buttons.iter().filter_map(Button::navigation_target)
    }
}

/// How listing entries are ordered in the rendered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
    /// Keep the order the entries were supplied in.
    AsGiven,
    /// Sort lexicographically (code point order, stable).
    Sorted,
}

/// Render a listing body: heading, blank line, one entry per line and an
/// optional footer separated by another blank line.
///
/// # Examples
///
/// ```
/// use politcol_bot::menu::screen::{format_listing, ListingOrder};
///
/// let body = format_listing("Staff:", &["Bob", "Alice"], None, ListingOrder::Sorted);
/// assert_eq!(body, "Staff:\n\nAlice\nBob");
/// ```
#[must_use]
pub fn format_listing<S: AsRef<str>>(
    heading: &str,
    entries: &[S],
    footer: Option<&str>,
    order: ListingOrder,
) -> String {
    let mut lines: Vec<&str> = entries.iter().map(AsRef::as_ref).collect();
    if order == ListingOrder::Sorted {
        lines.sort();
    }

    let mut body = format!("{heading}\n\n{}", lines.join("\n"));
    if let Some(footer) = footer {
        body.push_str("\n\n");
        body.push_str(footer);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_as_given_keeps_order() {
        let body = format_listing("H", &["b", "a", "c"], Some("F"), ListingOrder::AsGiven);
        assert_eq!(body, "H\n\nb\na\nc\n\nF");
    }

    #[test]
    fn test_listing_sorted_uses_code_point_order() {
        // 'Ғ' (U+0492) sorts after the whole basic Cyrillic block
        let body = format_listing("H", &["Ғалым", "Сари", "Аби"], None, ListingOrder::Sorted);
        assert_eq!(body, "H\n\nАби\nСари\nҒалым");
    }

    #[test]
    fn test_navigation_targets_skip_links() {
        let url = Url::parse("https://example.org/").expect("valid url");
        let screen = Screen::new("s", "text")
            .navigate("a", "one")
            .link("site", url)
            .navigate("b", "two");

        let targets: Vec<&str> = screen.navigation_targets().collect();
        assert_eq!(targets, vec!["one", "two"]);
        assert_eq!(screen.buttons().len(), 3);
    }
}
