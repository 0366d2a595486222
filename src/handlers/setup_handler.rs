//! Automation setup conversation: symbol validation and resolution.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::info;

use crate::core::{BotError, Handler, HandlerResponse, Message, Result};
use crate::handlers::is_valid_symbol;
use crate::market::QuoteSource;
use crate::session::SessionStore;
use crate::telegram::keyboards::period_keyboard;
use crate::texts::{render, LanguageStore};

/// Consumes symbol replies from users who started automation setup. Invalid
/// or unknown symbols keep the user in the symbol step; a resolved symbol
/// advances to period selection via the inline frequency menu.
pub struct SetupHandler {
    bot: Bot,
    quotes: Arc<dyn QuoteSource>,
    sessions: Arc<SessionStore>,
    languages: Arc<LanguageStore>,
}

impl SetupHandler {
    pub fn new(
        bot: Bot,
        quotes: Arc<dyn QuoteSource>,
        sessions: Arc<SessionStore>,
        languages: Arc<LanguageStore>,
    ) -> Self {
        Self {
            bot,
            quotes,
            sessions,
            languages,
        }
    }
}

#[async_trait]
impl Handler for SetupHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        if !self.sessions.is_awaiting_symbol(user_id) {
            return Ok(HandlerResponse::Continue);
        }
        let text = message.content.trim();
        if text.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        let lang = self.languages.get(user_id);
        let t = lang.texts();
        let symbol = text.to_uppercase();
        // Plain validation replies ride the chain's Reply path; the user stays
        // in the symbol step either way.
        if !is_valid_symbol(&symbol) {
            return Ok(HandlerResponse::Reply(t.invalid_symbol.to_string()));
        }

        let Some(slug) = self.quotes.resolve_symbol(&symbol).await else {
            return Ok(HandlerResponse::Reply(render(
                t.symbol_not_found,
                &[("symbol", &symbol)],
            )));
        };

        info!(user_id, symbol = %symbol, slug = %slug, "Setup symbol resolved");
        self.sessions.await_period(user_id, symbol.clone(), slug);
        self.bot
            .send_message(
                ChatId(message.chat.id),
                render(t.choose_frequency, &[("symbol", &symbol)]),
            )
            .reply_markup(period_keyboard(lang))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(HandlerResponse::Stop)
    }
}
