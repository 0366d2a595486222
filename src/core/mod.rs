//! Core types and traits: Handler, ChatTransport, Message, error, logger.
//! Transport-agnostic; the telegram module adapts teloxide types to these.

pub mod error;
pub mod logger;
pub mod transport;
pub mod types;

pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use transport::ChatTransport;
pub use types::{
    parse_message_id, Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage,
    ToCoreUser, User,
};
