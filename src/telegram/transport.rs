//! [`ChatTransport`] backed by a teloxide [`Bot`].

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::MessageId;

use crate::core::{BotError, ChatTransport, Result};

/// Plain-text sender and deleter over the Telegram Bot API. Keyboard-bearing
/// replies go through the handlers directly; this surface is what the
/// scheduler-driven paths (delivery, janitor) need.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i32> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(sent.id.0)
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }
}
