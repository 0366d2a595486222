//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] carries validation
//! failures raised inside handlers and parsers.

use thiserror::Error;

/// Top-level error for the bot (chat transport, quote provider, handler).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Validation failures from handler-level parsing.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid period token: {0}")]
    InvalidPeriod(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
