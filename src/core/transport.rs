//! Chat transport capability consumed by the core.
//!
//! The automation core only needs to send plain text messages and delete
//! messages by id; everything keyboard- or menu-related stays in the telegram
//! layer. Tests substitute a recording implementation.

use async_trait::async_trait;

use super::error::Result;

/// Minimal outbound chat capability: send text, delete by id.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a text message and returns the transport message id of the sent message.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i32>;

    /// Deletes a message. Callers treat failure as "already gone".
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;
}
