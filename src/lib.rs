//! Telegram bot for crypto quotes: manual ticker lookups plus recurring
//! "automations" that deliver quotes on a fixed period, with menus in four
//! languages and automatic cleanup of transient messages.

pub mod automation;
pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod market;
pub mod runner;
pub mod sched;
pub mod session;
pub mod telegram;
pub mod texts;

pub use chain::HandlerChain;
pub use components::{
    build_bot_components, build_callback_router, build_handler_chain, BotComponents,
};
pub use config::BotConfig;
pub use runner::run_bot;
