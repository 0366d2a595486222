//! Per-tick delivery of automation updates.

use std::sync::Arc;

use tracing::{instrument, warn};

use super::{MessageJanitor, Period};
use crate::core::ChatTransport;
use crate::market::{format_quote, QuoteSource};
use crate::texts::{period_label, render, LanguageStore};

/// Payload captured when an automation's job is registered; carried through
/// every tick of that registration.
#[derive(Debug, Clone)]
pub struct TickPayload {
    pub user_id: i64,
    pub chat_id: i64,
    pub symbol: String,
    pub slug: String,
    pub period: Period,
}

/// Executes one automation tick: fetch a fresh quote and deliver it, or a
/// localized "unavailable" notice when the provider has no data. Exactly one
/// outbound message per tick, no intra-tick retry: a persistently failing
/// provider degrades to one notice per interval.
pub struct DeliveryWorker {
    quotes: Arc<dyn QuoteSource>,
    transport: Arc<dyn ChatTransport>,
    janitor: Arc<MessageJanitor>,
    languages: Arc<LanguageStore>,
}

impl DeliveryWorker {
    pub fn new(
        quotes: Arc<dyn QuoteSource>,
        transport: Arc<dyn ChatTransport>,
        janitor: Arc<MessageJanitor>,
        languages: Arc<LanguageStore>,
    ) -> Self {
        Self {
            quotes,
            transport,
            janitor,
            languages,
        }
    }

    #[instrument(skip(self, payload), fields(user_id = payload.user_id, symbol = %payload.symbol))]
    pub async fn tick(&self, payload: &TickPayload) {
        let lang = self.languages.get(payload.user_id);
        let t = lang.texts();

        let quote = self
            .quotes
            .fetch_quote(&payload.slug)
            .await
            .filter(|q| q.stats.price.is_some());

        let text = match quote {
            Some(quote) => format!(
                "{}\n{}",
                render(
                    t.automation_prefix,
                    &[("period", period_label(lang, payload.period))],
                ),
                format_quote(&quote, lang)
            ),
            None => render(t.fetch_unavailable, &[("symbol", &payload.symbol)]),
        };

        match self.transport.send_message(payload.chat_id, &text).await {
            Ok(message_id) => {
                // Delivered messages (success and failure notices alike) live
                // for one interval, so they never accumulate faster than the
                // automation itself produces them.
                self.janitor
                    .schedule_delete(payload.chat_id, message_id, payload.period.interval());
            }
            Err(e) => {
                warn!(
                    chat_id = payload.chat_id,
                    symbol = %payload.symbol,
                    error = %e,
                    "Failed to deliver automation update"
                );
            }
        }
    }
}
