//! View layer: turns menu buttons into Telegram inline keyboards.

use crate::menu::{Button, ButtonAction};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Convert a single menu button.
#[must_use]
pub fn inline_button(button: &Button) -> InlineKeyboardButton {
    match button.action() {
        ButtonAction::Navigate(target) => {
            InlineKeyboardButton::callback(button.label(), target.clone())
        }
        ButtonAction::Link(url) => InlineKeyboardButton::url(button.label(), url.clone()),
    }
}

/// Build an inline keyboard with one button per row.
#[must_use]
pub fn inline_keyboard(buttons: &[Button]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(buttons.iter().map(|button| vec![inline_button(button)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_keyboard_has_one_button_per_row() {
        let url = Url::parse("https://politcol.kz/").expect("valid url");
        let buttons = vec![
            Button::navigate("📞 Контакты", "contact"),
            Button::link("🌐 Сайт", url.clone()),
        ];

        let markup = inline_keyboard(&buttons);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert!(markup.inline_keyboard.iter().all(|row| row.len() == 1));

        let first = &markup.inline_keyboard[0][0];
        assert_eq!(first.text, "📞 Контакты");
        assert_eq!(
            first.kind,
            InlineKeyboardButtonKind::CallbackData("contact".to_string())
        );

        let second = &markup.inline_keyboard[1][0];
        assert_eq!(second.text, "🌐 Сайт");
        assert_eq!(second.kind, InlineKeyboardButtonKind::Url(url));
    }

    #[test]
    fn test_empty_keyboard() {
        assert!(inline_keyboard(&[]).inline_keyboard.is_empty());
    }
}
