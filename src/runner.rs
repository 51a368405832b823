//! Telegram runtime entrypoint.

use crate::bot::handlers::{self, Command};
use crate::menu::Router;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use teloxide::dispatching::{ShutdownToken, UpdateHandler};
use teloxide::error_handlers::ErrorHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::update_listeners;
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Failures that stop the bot.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Another process is polling updates with the same token (409 Conflict)
    #[error("another bot instance is already polling updates (409 Conflict)")]
    Conflict,
    /// Telegram rejected the token (401 Unauthorized)
    #[error("Telegram rejected the bot token (Unauthorized)")]
    AuthRejected,
    /// Any other failed start-up request
    #[error("Telegram request failed: {0}")]
    Request(RequestError),
}

impl TransportError {
    /// What the operator should do about it.
    #[must_use]
    pub const fn guidance(&self) -> &'static str {
        match self {
            Self::Conflict => {
                "Stop the other bot process or disable parallel polling, then restart."
            }
            Self::AuthRejected => "Check BOT_TOKEN or issue a new token via @BotFather.",
            Self::Request(_) => "Check network access to api.telegram.org and restart.",
        }
    }

    /// Fatal kind of a request error, if it is one.
    #[must_use]
    pub const fn fatal_kind(error: &RequestError) -> Option<FatalKind> {
        match error {
            RequestError::Api(ApiError::TerminatedByOtherGetUpdates) => Some(FatalKind::Conflict),
            RequestError::Api(ApiError::InvalidToken) => Some(FatalKind::AuthRejected),
            _ => None,
        }
    }
}

impl From<RequestError> for TransportError {
    fn from(error: RequestError) -> Self {
        match Self::fatal_kind(&error) {
            Some(kind) => kind.into(),
            None => Self::Request(error),
        }
    }
}

/// Request errors that must stop the process instead of being retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalKind {
    /// See [`TransportError::Conflict`]
    Conflict,
    /// See [`TransportError::AuthRejected`]
    AuthRejected,
}

impl From<FatalKind> for TransportError {
    fn from(kind: FatalKind) -> Self {
        match kind {
            FatalKind::Conflict => Self::Conflict,
            FatalKind::AuthRejected => Self::AuthRejected,
        }
    }
}

/// Polling error handler: logs transient errors, shuts the dispatcher down on
/// fatal ones and remembers which one it was.
struct PollingErrorHandler {
    shutdown: ShutdownToken,
    fatal: Arc<OnceLock<FatalKind>>,
}

impl ErrorHandler<RequestError> for PollingErrorHandler {
    fn handle_error(
        self: Arc<Self>,
        error: RequestError,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        match TransportError::fatal_kind(&error) {
            Some(kind) => {
                error!("Polling stopped: {}", TransportError::from(kind));
                if self.fatal.set(kind).is_ok() {
                    let token = self.shutdown.clone();
                    tokio::spawn(async move {
                        match token.shutdown() {
                            Ok(stopped) => stopped.await,
                            Err(_) => warn!("Dispatcher was idle during shutdown request"),
                        }
                    });
                }
            }
            None => warn!("Polling error: {error}"),
        }
        Box::pin(async {})
    }
}

/// Run the Telegram transport runtime until Ctrl-C or a fatal error.
///
/// # Errors
///
/// Returns [`TransportError::AuthRejected`] if the token is refused,
/// [`TransportError::Conflict`] if another instance takes over polling, or
/// [`TransportError::Request`] if the start-up `getMe` call fails otherwise.
pub async fn run_bot(token: String, router: Arc<Router>) -> Result<(), TransportError> {
    let bot = Bot::new(token);

    let me = bot.get_me().await?;
    info!("Bot started: @{} (id={})", me.username(), me.user.id.0);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {e}");
    }

    let mut dispatcher = Dispatcher::builder(bot.clone(), setup_handler())
        .dependencies(dptree::deps![router])
        .default_handler(ignore_update)
        .enable_ctrlc_handler()
        .build();

    let fatal = Arc::new(OnceLock::new());
    let error_handler = Arc::new(PollingErrorHandler {
        shutdown: dispatcher.shutdown_token(),
        fatal: fatal.clone(),
    });
    let listener = update_listeners::polling_default(bot).await;

    info!("Bot is running...");
    dispatcher
        .dispatch_with_listener(listener, error_handler)
        .await;

    match fatal.get() {
        Some(&kind) => Err(kind.into()),
        None => {
            info!("Bot stopped.");
            Ok(())
        }
    }
}

fn setup_handler() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_menu_callback))
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
}

/// Plain messages and other update kinds get no reply.
async fn ignore_update(update: Arc<Update>) {
    debug!(update_id = update.id.0, "Ignoring update");
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    router: Arc<Router>,
) -> Result<(), RequestError> {
    let res = match cmd {
        Command::Start => handlers::start(bot, msg, router).await,
        Command::Help => handlers::help(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_menu_callback(
    bot: Bot,
    q: CallbackQuery,
    router: Arc<Router>,
) -> Result<(), RequestError> {
    if let Err(e) = handlers::handle_menu_callback(bot, q, router).await {
        error!("Menu callback handler error: {}", e);
    }
    respond(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert_eq!(
            TransportError::fatal_kind(&RequestError::Api(ApiError::TerminatedByOtherGetUpdates)),
            Some(FatalKind::Conflict)
        );
        assert_eq!(
            TransportError::fatal_kind(&RequestError::Api(ApiError::InvalidToken)),
            Some(FatalKind::AuthRejected)
        );
        assert_eq!(
            TransportError::fatal_kind(&RequestError::Api(ApiError::MessageNotModified)),
            None
        );
    }

    #[test]
    fn test_request_error_conversion() {
        let err = TransportError::from(RequestError::Api(ApiError::InvalidToken));
        assert!(matches!(err, TransportError::AuthRejected));
        assert!(err.guidance().contains("@BotFather"));

        let err = TransportError::from(RequestError::Api(ApiError::BotBlocked));
        assert!(matches!(err, TransportError::Request(_)));
    }

    fn error_handler() -> (Arc<PollingErrorHandler>, Arc<OnceLock<FatalKind>>) {
        let router = Arc::new(Router::new(
            crate::menu::content::college_catalog().expect("college catalog must be valid"),
        ));
        let dispatcher = Dispatcher::builder(Bot::new("123456789:test"), setup_handler())
            .dependencies(dptree::deps![router])
            .build();
        let fatal = Arc::new(OnceLock::new());
        let handler = Arc::new(PollingErrorHandler {
            shutdown: dispatcher.shutdown_token(),
            fatal: fatal.clone(),
        });
        (handler, fatal)
    }

    #[tokio::test]
    async fn test_conflict_stops_polling_once() {
        let (handler, fatal) = error_handler();

        handler
            .clone()
            .handle_error(RequestError::Api(ApiError::TerminatedByOtherGetUpdates))
            .await;
        handler
            .handle_error(RequestError::Api(ApiError::InvalidToken))
            .await;

        assert_eq!(fatal.get(), Some(&FatalKind::Conflict));
    }

    #[tokio::test]
    async fn test_non_fatal_polling_error_keeps_running() {
        let (handler, fatal) = error_handler();

        handler
            .handle_error(RequestError::Api(ApiError::BotBlocked))
            .await;

        assert!(fatal.get().is_none());
    }

    #[tokio::test]
    async fn test_plain_text_goes_to_default_handler() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 892252934,
                "message": {
                    "message_id": 6557,
                    "from": {"id": 218485655, "is_bot": false, "first_name": "Caps", "username": "aCaps1", "language_code": "en"},
                    "chat": {"id": 218485655, "first_name": "Caps", "username": "aCaps1", "type": "private"},
                    "date": 1567927221,
                    "text": "hello"
                }
            }"#,
        )
        .expect("valid update");

        let text = match &update.kind {
            teloxide::types::UpdateKind::Message(msg) => msg.text().map(str::to_owned),
            _ => None,
        };
        assert_eq!(text.as_deref(), Some("hello"));
        assert!(Command::parse("hello", "politcol_bot").is_err());

        ignore_update(Arc::new(update)).await;
    }
}
