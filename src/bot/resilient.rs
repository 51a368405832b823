//! Resilient messaging utilities with automatic retry for Telegram API operations.
//!
//! This module provides wrappers around Telegram API operations that automatically
//! retry on transient network failures using exponential backoff with jitter.
//!
//! # Usage
//!
//! ```ignore
//! use politcol_bot::bot::resilient::{edit_message_resilient, send_message_resilient};
//!
//! // Send with automatic retry
//! let msg = send_message_resilient(&bot, chat_id, "Hello!", keyboard.clone()).await?;
//!
//! // Edit; `Ok(None)` when Telegram reports the message as not modified
//! let edited = edit_message_resilient(&bot, chat_id, msg.id, "Hello!", keyboard).await?;
//! ```

use crate::utils::retry_telegram_operation;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, Message, MessageId};
use teloxide::{ApiError, RequestError};
use tracing::debug;

/// Send a message with an inline keyboard, retrying on network failures.
///
/// # Errors
///
/// Returns the last [`RequestError`] after all retries are exhausted, or the
/// first non-transient one.
pub async fn send_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    keyboard: InlineKeyboardMarkup,
) -> Result<Message, RequestError> {
    let text = text.into();
    retry_telegram_operation(|| async {
        bot.send_message(chat_id, text.clone())
            .reply_markup(keyboard.clone())
            .await
    })
    .await
}

/// Edit a message's text and inline keyboard, retrying on network failures.
///
/// Re-rendering identical content is not an error: Telegram's
/// "message is not modified" reply maps to `Ok(None)`.
///
/// # Errors
///
/// Returns the last [`RequestError`] after all retries are exhausted, or the
/// first non-transient one.
pub async fn edit_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    msg_id: MessageId,
    text: impl Into<String>,
    keyboard: InlineKeyboardMarkup,
) -> Result<Option<Message>, RequestError> {
    let text = text.into();
    let result = retry_telegram_operation(|| async {
        bot.edit_message_text(chat_id, msg_id, text.clone())
            .reply_markup(keyboard.clone())
            .await
    })
    .await;

    match result {
        Ok(msg) => Ok(Some(msg)),
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            debug!("Message update skipped: message is not modified");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Whether an edit failed because the original message is gone or frozen,
/// so a fresh message has to be sent instead.
#[must_use]
pub const fn needs_new_message(error: &RequestError) -> bool {
    matches!(
        error,
        RequestError::Api(ApiError::MessageToEditNotFound | ApiError::MessageCantBeEdited)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_new_message() {
        assert!(needs_new_message(&RequestError::Api(
            ApiError::MessageToEditNotFound
        )));
        assert!(needs_new_message(&RequestError::Api(
            ApiError::MessageCantBeEdited
        )));
        assert!(!needs_new_message(&RequestError::Api(
            ApiError::MessageNotModified
        )));
    }
}
