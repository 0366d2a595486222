//! Dispatcher wiring: update routing plus the polling/webhook listener.

use std::sync::Arc;

use anyhow::Context;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::Message as TgMessage;
use teloxide::update_listeners::{webhooks, Polling};
use tracing::{info, warn};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::{BotError, HandlerResponse, Result, ToCoreMessage};
use crate::telegram::adapters::TelegramMessageWrapper;
use crate::telegram::callbacks::CallbackRouter;

async fn on_message(msg: TgMessage, bot: Bot, chain: HandlerChain) -> Result<()> {
    if msg.text().is_none() {
        return Ok(());
    }
    let core_message = TelegramMessageWrapper(&msg).to_core();
    match chain.handle(&core_message).await {
        // Handlers send their own richer replies; Reply is the plain-text path.
        Ok(HandlerResponse::Reply(text)) => {
            bot.send_message(msg.chat.id, text)
                .await
                .map_err(|e| BotError::Transport(e.to_string()))?;
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(chat_id = msg.chat.id.0, error = %e, "Handler chain failed");
            Err(e)
        }
    }
}

async fn on_callback(query: CallbackQuery, router: Arc<CallbackRouter>) -> Result<()> {
    router.dispatch(query).await
}

/// Runs the dispatcher until shutdown, in webhook or long-polling mode.
pub async fn run_dispatcher(
    bot: Bot,
    chain: HandlerChain,
    router: Arc<CallbackRouter>,
    config: &BotConfig,
) -> anyhow::Result<()> {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![chain, router])
        .enable_ctrlc_handler()
        .build();

    if config.use_webhook {
        let url = config
            .webhook_url()?
            .parse()
            .context("invalid webhook URL")?;
        let addr = ([0, 0, 0, 0], config.port).into();
        info!(%url, port = config.port, "Starting in webhook mode");
        let listener = webhooks::axum(
            bot,
            webhooks::Options::new(addr, url).drop_pending_updates(),
        )
        .await
        .context("failed to register webhook")?;
        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("Webhook listener error"),
            )
            .await;
    } else {
        info!("Starting in polling mode");
        let listener = Polling::builder(bot).drop_pending_updates().build();
        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("Polling listener error"),
            )
            .await;
    }
    Ok(())
}
