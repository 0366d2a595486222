//! Telegram transport layer: teloxide adapters, outbound transport, menus,
//! command grammar, callback routing, and the dispatcher loop.

pub mod adapters;
pub mod callbacks;
pub mod commands;
pub mod dispatch;
pub mod keyboards;
pub mod transport;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use callbacks::CallbackRouter;
pub use commands::{command_for_menu_text, Command};
pub use dispatch::run_dispatcher;
pub use transport::TelegramTransport;
