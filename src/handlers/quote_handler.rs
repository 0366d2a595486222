//! Manual ticker lookups: any remaining text message is treated as a symbol.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatAction;

use crate::automation::{MessageJanitor, MANUAL_QUOTE_DELETE_DELAY};
use crate::core::{BotError, Handler, HandlerResponse, Message, Result};
use crate::handlers::is_valid_symbol;
use crate::market::{format_quote, QuoteSource};
use crate::telegram::keyboards::main_menu;
use crate::texts::{render, LanguageStore};

/// Last handler in the chain: resolves the text as a ticker and replies with
/// a formatted quote. The reply hangs around for a day, then gets cleaned up.
pub struct QuoteHandler {
    bot: Bot,
    quotes: Arc<dyn QuoteSource>,
    languages: Arc<LanguageStore>,
    janitor: Arc<MessageJanitor>,
}

impl QuoteHandler {
    pub fn new(
        bot: Bot,
        quotes: Arc<dyn QuoteSource>,
        languages: Arc<LanguageStore>,
        janitor: Arc<MessageJanitor>,
    ) -> Self {
        Self {
            bot,
            quotes,
            languages,
            janitor,
        }
    }
}

#[async_trait]
impl Handler for QuoteHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        // Unknown slash commands get no reply, like any bot that keeps quiet
        // about commands it does not implement.
        if text.starts_with('/') {
            return Ok(HandlerResponse::Stop);
        }

        let user_id = message.user.id;
        let chat_id = message.chat.id;
        let lang = self.languages.get(user_id);
        let t = lang.texts();

        let symbol = text.to_uppercase();
        if !is_valid_symbol(&symbol) {
            return Ok(HandlerResponse::Reply(t.invalid_symbol.to_string()));
        }

        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;

        let Some(slug) = self.quotes.resolve_symbol(&symbol).await else {
            return Ok(HandlerResponse::Reply(render(
                t.symbol_not_found,
                &[("symbol", &symbol)],
            )));
        };

        let quote = self
            .quotes
            .fetch_quote(&slug)
            .await
            .filter(|q| q.stats.price.is_some());
        let Some(quote) = quote else {
            return Ok(HandlerResponse::Reply(t.manual_fetch_fail.to_string()));
        };

        let sent = self
            .bot
            .send_message(ChatId(chat_id), format_quote(&quote, lang))
            .reply_markup(main_menu(lang))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        self.janitor
            .schedule_delete(chat_id, sent.id.0, MANUAL_QUOTE_DELETE_DELAY);
        Ok(HandlerResponse::Stop)
    }
}
