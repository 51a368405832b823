/// Command and callback handlers
pub mod handlers;
/// Resilient messaging with automatic retry for Telegram API operations
pub mod resilient;
/// Menu transport abstraction and its Telegram implementation
pub mod transport;
/// View layer for UI components (inline keyboards)
pub mod views;

pub use transport::{dispatch_action, ChatTarget, MenuTransport, TelegramTransport};
