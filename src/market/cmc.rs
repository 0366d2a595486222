//! CoinMarketCap public data-api client.
//!
//! Uses the undocumented listing endpoint to build a symbol → slug map
//! (refreshed on demand, cached for a configurable TTL) and the detail
//! endpoint for per-coin statistics. All outbound calls carry a fixed
//! 10-second timeout so a hung provider cannot stall a scheduler tick.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{Quote, QuoteSource, QuoteStats};
use crate::core::{BotError, Result};

const LISTING_URL: &str = "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/listing";
const DETAIL_URL: &str = "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/detail";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for public CoinMarketCap endpoints with a symbol-resolution cache.
pub struct CoinMarketCapClient {
    http: reqwest::Client,
    listing_limit: u32,
    cache_ttl: Duration,
    cache: RwLock<SymbolCache>,
}

#[derive(Default)]
struct SymbolCache {
    slugs: HashMap<String, String>,
    refreshed_at: Option<Instant>,
}

#[derive(Deserialize)]
struct ListingResponse {
    data: Option<ListingData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingData {
    #[serde(default)]
    crypto_currency_list: Vec<ListingItem>,
}

#[derive(Deserialize)]
struct ListingItem {
    symbol: Option<String>,
    slug: Option<String>,
}

#[derive(Deserialize)]
struct DetailResponse {
    data: Option<DetailData>,
}

#[derive(Deserialize)]
struct DetailData {
    name: Option<String>,
    symbol: Option<String>,
    statistics: Option<QuoteStats>,
}

impl CoinMarketCapClient {
    /// Creates a client. `listing_limit` bounds how many coins the symbol
    /// cache covers; `cache_ttl` is how long a listing snapshot stays valid.
    pub fn new(listing_limit: u32, cache_ttl: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| BotError::Provider(e.to_string()))?;
        Ok(Self {
            http,
            listing_limit,
            cache_ttl,
            cache: RwLock::new(SymbolCache::default()),
        })
    }

    async fn refresh_if_stale(&self) {
        {
            let cache = self.cache.read().await;
            let fresh = cache
                .refreshed_at
                .map(|t| t.elapsed() < self.cache_ttl)
                .unwrap_or(false);
            if fresh && !cache.slugs.is_empty() {
                return;
            }
        }

        match self.fetch_listing().await {
            Ok(slugs) => {
                info!(symbols = slugs.len(), "Loaded symbol listing from CoinMarketCap");
                let mut cache = self.cache.write().await;
                cache.slugs = slugs;
                cache.refreshed_at = Some(Instant::now());
            }
            Err(e) => {
                // A stale (or empty) cache stays in place; resolution may
                // still succeed from the previous snapshot.
                warn!(error = %e, "Failed refreshing symbol cache");
            }
        }
    }

    async fn fetch_listing(&self) -> Result<HashMap<String, String>> {
        let response = self
            .http
            .get(LISTING_URL)
            .query(&[
                ("start", "1".to_string()),
                ("limit", self.listing_limit.to_string()),
                ("sortBy", "market_cap".to_string()),
                ("sortType", "desc".to_string()),
                ("convert", "USD".to_string()),
                ("cryptoType", "all".to_string()),
                ("tagType", "all".to_string()),
                ("audited", "false".to_string()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| BotError::Provider(e.to_string()))?;

        let payload: ListingResponse = response
            .json()
            .await
            .map_err(|e| BotError::Provider(e.to_string()))?;

        let mut slugs = HashMap::new();
        for item in payload.data.map(|d| d.crypto_currency_list).unwrap_or_default() {
            let symbol = item.symbol.unwrap_or_default().to_uppercase();
            if symbol.is_empty() {
                continue;
            }
            if let Some(slug) = item.slug {
                // First occurrence wins; the listing is sorted by market cap.
                slugs.entry(symbol).or_insert(slug);
            }
        }
        Ok(slugs)
    }

    async fn fetch_detail(&self, slug: &str) -> Result<Option<Quote>> {
        let response = self
            .http
            .get(DETAIL_URL)
            .query(&[("slug", slug)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| BotError::Provider(e.to_string()))?;

        let payload: DetailResponse = response
            .json()
            .await
            .map_err(|e| BotError::Provider(e.to_string()))?;

        Ok(payload.data.map(|data| Quote {
            name: data.name,
            symbol: data.symbol,
            slug: slug.to_string(),
            stats: data.statistics.unwrap_or_default(),
        }))
    }
}

#[async_trait]
impl QuoteSource for CoinMarketCapClient {
    async fn resolve_symbol(&self, symbol: &str) -> Option<String> {
        self.refresh_if_stale().await;
        self.cache.read().await.slugs.get(&symbol.to_uppercase()).cloned()
    }

    async fn fetch_quote(&self, slug: &str) -> Option<Quote> {
        match self.fetch_detail(slug).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(slug, error = %e, "Failed fetching coin detail");
                None
            }
        }
    }
}
