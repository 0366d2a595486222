//! Quote provider capability: symbol resolution and point-in-time statistics.
//!
//! The core treats the provider as fallible-but-silent: both operations return
//! `None` on transport errors or unknown symbols, and the caller decides what
//! "no data" means for its flow.

pub mod cmc;
pub mod format;

use async_trait::async_trait;
use serde::Deserialize;

pub use cmc::CoinMarketCapClient;
pub use format::{format_amount, format_change, format_price, format_quote};

/// Point-in-time statistics for one coin. All fields are optional; the
/// formatter degrades field by field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStats {
    pub price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub rank: Option<u32>,
}

/// One fetched quote: identity plus statistics.
#[derive(Debug, Clone)]
pub struct Quote {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub slug: String,
    pub stats: QuoteStats,
}

/// Provider capability consumed by the bot. Implementations swallow transport
/// errors (logging them) and return `None`.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Resolves an uppercase ticker symbol to the provider's slug.
    async fn resolve_symbol(&self, symbol: &str) -> Option<String>;

    /// Fetches fresh statistics for a previously resolved slug.
    async fn fetch_quote(&self, slug: &str) -> Option<Quote>;
}
