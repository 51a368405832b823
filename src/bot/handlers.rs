//! Command and inline-button handlers for the menu.

use super::transport::{dispatch_action, ChatTarget, MenuTransport, TelegramTransport};
use crate::menu::{Router, ENTRY_ACTION};
use anyhow::Result;
use std::sync::Arc;
use teloxide::{prelude::*, types::CallbackQuery, utils::command::BotCommands};
use tracing::{debug, info};

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    /// Show the main menu
    #[command(description = "Открыть главное меню.")]
    Start,
    /// List commands
    #[command(description = "Показать список команд.")]
    Help,
}

// Helper function to get user name from Message
fn get_user_name(msg: &Message) -> String {
    if let Some(ref user) = msg.from {
        if let Some(ref username) = user.username {
            return username.clone();
        }
        if !user.first_name.is_empty() {
            return user.first_name.clone();
        }
    }
    "Unknown".to_string()
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
#[must_use]
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Start handler: posts the greeting with the main menu.
///
/// # Errors
///
/// Returns an error if the menu message cannot be sent.
pub async fn start(bot: Bot, msg: Message, router: Arc<Router>) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    let user_name = get_user_name(&msg);

    info!("User {user_id} ({user_name}) initiated /start command.");

    let transport = TelegramTransport::for_command(bot);
    let target = ChatTarget {
        chat_id: msg.chat.id,
        message_id: None,
    };
    dispatch_action(&router, &transport, ENTRY_ACTION, target).await
}

/// Help handler: lists the commands.
///
/// # Errors
///
/// Returns an error if the message cannot be sent.
pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

/// Inline button handler.
///
/// Every callback query is answered exactly once, including ones without
/// data or without an accessible message.
///
/// # Errors
///
/// Returns an error if the screen cannot be rendered.
pub async fn handle_menu_callback(bot: Bot, q: CallbackQuery, router: Arc<Router>) -> Result<()> {
    let user_id = q.from.id.0.cast_signed();
    let data = q.data.clone();
    let target = q.message.as_ref().map(|msg| ChatTarget {
        chat_id: msg.chat().id,
        message_id: Some(msg.id()),
    });

    let transport = TelegramTransport::for_callback(bot, q);

    let (Some(action), Some(target)) = (data, target) else {
        debug!(user_id, "Callback without data or message, acknowledging only");
        return transport.acknowledge().await;
    };

    debug!(user_id, action = %action, "Menu callback");
    dispatch_action(&router, &transport, &action, target).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "politcol_bot").ok(), Some(Command::Start));
        assert_eq!(Command::parse("/help", "politcol_bot").ok(), Some(Command::Help));
        assert!(Command::parse("/unknown", "politcol_bot").is_err());
    }

    #[test]
    fn test_descriptions_list_commands() {
        let text = Command::descriptions().to_string();
        assert!(text.contains("/start"));
        assert!(text.contains("/help"));
    }
}
