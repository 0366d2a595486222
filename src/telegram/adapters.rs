//! Adapters from teloxide types to the transport-agnostic core types.

use teloxide::types::{Chat as TgChat, Message as TgMessage, User as TgUser};

use crate::core::{Chat, Message, MessageDirection, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide user for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a TgUser);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn chat_type(chat: &TgChat) -> String {
    if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "channel"
    }
    .to_string()
}

/// Wraps a teloxide message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a TgMessage);

impl ToCoreMessage for TelegramMessageWrapper<'_> {
    fn to_core(&self) -> Message {
        // Channel posts carry no sender; a zero user id never matches a
        // per-user table, so those updates fall through the handlers.
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or(User {
                id: 0,
                username: None,
                first_name: None,
                last_name: None,
            });

        Message {
            id: self.0.id.0.to_string(),
            user,
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: chat_type(&self.0.chat),
            },
            content: self.0.text().unwrap_or_default().to_string(),
            direction: MessageDirection::Incoming,
            created_at: self.0.date,
        }
    }
}
