//! Glue between the router and a chat transport.
//!
//! [`dispatch_action`] is the only place where an action becomes I/O: it asks
//! the router for a render command, applies it, and acknowledges the action
//! exactly once whatever happened before.

use super::resilient::{edit_message_resilient, needs_new_message, send_message_resilient};
use super::views::inline_keyboard;
use crate::menu::{Delivery, RenderAction, RenderCommand, Router};
use crate::utils::retry_telegram_operation;
use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, MessageId};
use tracing::{debug, warn};

/// Operations the menu needs from a chat platform.
#[async_trait]
pub trait MenuTransport: Send + Sync {
    /// Conversation handle passed through the router untouched.
    type Context: Send + Sync;

    /// Apply a render command. No-op commands must not touch the chat.
    async fn render(&self, command: &RenderCommand<'_, Self::Context>) -> Result<()>;

    /// Clear the "loading" state of the action that is being handled.
    async fn acknowledge(&self) -> Result<()>;
}

/// Route `action` and apply the result through `transport`.
///
/// The acknowledgment is sent even when rendering fails or is a no-op.
///
/// # Errors
///
/// Returns the render error, if any, after the action has been acknowledged.
/// Acknowledgment failures are logged only.
pub async fn dispatch_action<T: MenuTransport>(
    router: &Router,
    transport: &T,
    action: &str,
    context: T::Context,
) -> Result<()> {
    let command = router.handle(action, context);
    let rendered = if command.is_noop() {
        Ok(())
    } else {
        transport.render(&command).await
    };

    if let Err(e) = transport.acknowledge().await {
        warn!(action, "Failed to acknowledge action: {e}");
    }

    rendered
}

/// Telegram location a screen is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatTarget {
    /// Chat to write to.
    pub chat_id: ChatId,
    /// Message carrying the buttons that were tapped, if still accessible.
    pub message_id: Option<MessageId>,
}

/// [`MenuTransport`] over the Telegram Bot API, bound to one update.
pub struct TelegramTransport {
    bot: Bot,
    query: Option<CallbackQuery>,
}

impl TelegramTransport {
    /// Transport for a command message; there is nothing to acknowledge.
    #[must_use]
    pub const fn for_command(bot: Bot) -> Self {
        Self { bot, query: None }
    }

    /// Transport for a callback query, answered on [`MenuTransport::acknowledge`].
    #[must_use]
    pub const fn for_callback(bot: Bot, query: CallbackQuery) -> Self {
        Self {
            bot,
            query: Some(query),
        }
    }
}

#[async_trait]
impl MenuTransport for TelegramTransport {
    type Context = ChatTarget;

    async fn render(&self, command: &RenderCommand<'_, ChatTarget>) -> Result<()> {
        let RenderAction::Replace {
            body,
            buttons,
            delivery,
        } = &command.action
        else {
            return Ok(());
        };

        let target = command.context;
        let keyboard = inline_keyboard(buttons);

        if let (Delivery::EditInPlace, Some(msg_id)) = (delivery, target.message_id) {
            match edit_message_resilient(
                &self.bot,
                target.chat_id,
                msg_id,
                &**body,
                keyboard.clone(),
            )
            .await
            {
                Ok(_) => return Ok(()),
                Err(e) if needs_new_message(&e) => {
                    debug!("Message {msg_id:?} cannot be edited ({e}), sending a new one");
                }
                Err(e) => return Err(e.into()),
            }
        }

        send_message_resilient(&self.bot, target.chat_id, &**body, keyboard).await?;
        Ok(())
    }

    async fn acknowledge(&self) -> Result<()> {
        let Some(query) = &self.query else {
            return Ok(());
        };
        retry_telegram_operation(|| async {
            self.bot.answer_callback_query(query.id.clone()).await
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{Catalog, Screen};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        rendered: Mutex<Vec<String>>,
        acks: Mutex<usize>,
        fail_render: bool,
    }

    #[async_trait]
    impl MenuTransport for RecordingTransport {
        type Context = u32;

        async fn render(&self, command: &RenderCommand<'_, u32>) -> Result<()> {
            if self.fail_render {
                anyhow::bail!("network down");
            }
            if let RenderAction::Replace { body, .. } = &command.action {
                if let Ok(mut rendered) = self.rendered.lock() {
                    rendered.push(body.to_string());
                }
            }
            Ok(())
        }

        async fn acknowledge(&self) -> Result<()> {
            if let Ok(mut acks) = self.acks.lock() {
                *acks += 1;
            }
            Ok(())
        }
    }

    fn router() -> Router {
        let catalog = Catalog::builder("home")
            .screen(Screen::new("home", "Home").navigate("Go", "leaf"))
            .screen(Screen::new("leaf", "Leaf").navigate("Back", "home"))
            .build()
            .expect("valid catalog");
        Router::new(catalog)
    }

    #[tokio::test]
    async fn test_known_action_renders_and_acks() {
        let transport = RecordingTransport::default();
        dispatch_action(&router(), &transport, "leaf", 1)
            .await
            .expect("dispatch");

        assert_eq!(*transport.rendered.lock().expect("lock"), vec!["Leaf"]);
        assert_eq!(*transport.acks.lock().expect("lock"), 1);
    }

    #[tokio::test]
    async fn test_unknown_action_only_acks() {
        let transport = RecordingTransport::default();
        dispatch_action(&router(), &transport, "stale_button", 1)
            .await
            .expect("unknown action is not an error");

        assert!(transport.rendered.lock().expect("lock").is_empty());
        assert_eq!(*transport.acks.lock().expect("lock"), 1);
    }

    #[tokio::test]
    async fn test_render_failure_still_acks() {
        let transport = RecordingTransport {
            fail_render: true,
            ..Default::default()
        };
        let result = dispatch_action(&router(), &transport, "leaf", 1).await;

        assert!(result.is_err());
        assert_eq!(*transport.acks.lock().expect("lock"), 1);
    }
}
