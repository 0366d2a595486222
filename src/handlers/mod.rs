//! Message handlers for the chain: commands, setup conversation, manual quotes.

pub mod command_handler;
pub mod quote_handler;
pub mod setup_handler;

pub use command_handler::CommandHandler;
pub use quote_handler::QuoteHandler;
pub use setup_handler::SetupHandler;

/// Tickers are plain alphanumeric strings (`BTC`, `USDT`, `TON`).
pub(crate) fn is_valid_symbol(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphanumeric)
}
