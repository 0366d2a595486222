//! Transport-agnostic message model and handler traits.

pub mod chat;
pub mod handler;
pub mod message;
pub mod response;
pub mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::{parse_message_id, Message, MessageDirection};
pub use response::HandlerResponse;
pub use user::User;
