//! Component wiring: shared services behind their trait seams, plus the
//! handler chain assembled from them.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{Context, Result};
use teloxide::Bot;

use crate::automation::{AutomationRegistry, DeliveryWorker, MessageJanitor};
use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::ChatTransport;
use crate::handlers::{CommandHandler, QuoteHandler, SetupHandler};
use crate::market::{CoinMarketCapClient, QuoteSource};
use crate::sched::{Scheduler, TokioScheduler};
use crate::session::SessionStore;
use crate::telegram::{CallbackRouter, TelegramTransport};
use crate::texts::LanguageStore;

/// All long-lived services, shared via `Arc` across handlers, the callback
/// router, and the scheduler-driven workers.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Bot,
    pub transport: Arc<dyn ChatTransport>,
    pub quotes: Arc<dyn QuoteSource>,
    pub scheduler: Arc<dyn Scheduler>,
    pub janitor: Arc<MessageJanitor>,
    pub languages: Arc<LanguageStore>,
    pub sessions: Arc<SessionStore>,
    pub registry: Arc<AutomationRegistry>,
    /// Filled in at startup from `getMe`; needed to parse `/cmd@botname`.
    pub bot_username: Arc<RwLock<String>>,
}

/// Builds all components from config. Must run inside a tokio runtime (the
/// scheduler spawns onto the ambient runtime).
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let mut bot = Bot::new(&config.bot_token);
    if let Some(api_url) = &config.telegram_api_url {
        let url = api_url.parse().context("invalid TELEGRAM_API_URL")?;
        bot = bot.set_api_url(url);
    }

    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramTransport::new(bot.clone()));
    let quotes: Arc<dyn QuoteSource> = Arc::new(CoinMarketCapClient::new(
        config.listing_limit,
        Duration::from_secs(config.symbol_cache_secs),
    )?);
    let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::new());
    let janitor = Arc::new(MessageJanitor::new(
        Arc::clone(&scheduler),
        Arc::clone(&transport),
    ));
    let languages = Arc::new(LanguageStore::new());
    let sessions = Arc::new(SessionStore::new());

    let worker = Arc::new(DeliveryWorker::new(
        Arc::clone(&quotes),
        Arc::clone(&transport),
        Arc::clone(&janitor),
        Arc::clone(&languages),
    ));
    let registry = Arc::new(AutomationRegistry::new(Arc::clone(&scheduler), worker));

    Ok(BotComponents {
        bot,
        transport,
        quotes,
        scheduler,
        janitor,
        languages,
        sessions,
        registry,
        bot_username: Arc::new(RwLock::new(String::new())),
    })
}

/// Assembles the message handler chain: commands → setup conversation →
/// manual quote lookup.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            components.bot.clone(),
            Arc::clone(&components.registry),
            Arc::clone(&components.sessions),
            Arc::clone(&components.languages),
            Arc::clone(&components.janitor),
            Arc::clone(&components.bot_username),
        )))
        .add_handler(Arc::new(SetupHandler::new(
            components.bot.clone(),
            Arc::clone(&components.quotes),
            Arc::clone(&components.sessions),
            Arc::clone(&components.languages),
        )))
        .add_handler(Arc::new(QuoteHandler::new(
            components.bot.clone(),
            Arc::clone(&components.quotes),
            Arc::clone(&components.languages),
            Arc::clone(&components.janitor),
        )))
}

/// Builds the callback router over the same shared components.
pub fn build_callback_router(components: &BotComponents) -> Arc<CallbackRouter> {
    Arc::new(CallbackRouter::new(
        components.bot.clone(),
        Arc::clone(&components.registry),
        Arc::clone(&components.sessions),
        Arc::clone(&components.languages),
        Arc::clone(&components.janitor),
    ))
}
