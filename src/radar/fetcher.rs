//! Radar fetcher - discovery feed + per-token pair enrichment
//!
//! Flow for one fetch cycle:
//! 1. Pull boosted tokens from the discovery feed
//! 2. Deduplicate by `chainId:tokenAddress`, cap the fan-out
//! 3. Fetch pair metadata for every candidate concurrently
//! 4. Normalize the chosen pair into a `RadarToken`
//!
//! Failures never propagate: a failed discovery call yields an empty radar,
//! a failed or timed-out token lookup drops that token only.

use super::dexscreener::{DexScreenerPair, MarketFeed, TokenBoost};
use super::risk::evaluate_risk_flags;
use super::scorer::momentum_score;
use super::types::{identity_key, MarketMetrics, RadarToken};
use futures::future::join_all;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::timeout;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Bounds applied to one fetch cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchLimits {
    /// Maximum number of per-token lookups issued
    pub fanout: usize,
    /// Maximum number of radar tokens returned
    pub max_tokens: usize,
    /// Deadline for each per-token lookup
    pub request_timeout: Duration,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            fanout: 8,
            max_tokens: 10,
            request_timeout: Duration::from_secs(10),
        }
    }
}

pub struct RadarFetcher<F> {
    feed: F,
    limits: FetchLimits,
}

impl<F: MarketFeed> RadarFetcher<F> {
    pub fn new(feed: F, limits: FetchLimits) -> Self {
        Self { feed, limits }
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Run one fetch cycle
    ///
    /// # Arguments
    /// * `now_ms` - Current epoch milliseconds, used for pair age
    ///
    /// # Returns
    /// At most `max_tokens` radar tokens in discovery order
    pub async fn fetch_radar(&self, now_ms: i64) -> Vec<RadarToken> {
        let boosts = match self.feed.latest_boosts().await {
            Ok(boosts) => boosts,
            Err(e) => {
                warn!("⚠️  Discovery feed failed, returning empty radar: {}", e);
                return Vec::new();
            }
        };

        let candidates = dedupe_boosts(boosts, self.limits.fanout);
        debug!("Fetching pair metadata for {} candidates", candidates.len());

        let lookups = candidates
            .iter()
            .map(|boost| self.fetch_token(boost, now_ms));

        let tokens: Vec<RadarToken> = join_all(lookups)
            .await
            .into_iter()
            .flatten()
            .take(self.limits.max_tokens)
            .collect();

        info!(
            "📡 Radar cycle: {} candidates → {} tokens",
            candidates.len(),
            tokens.len()
        );

        tokens
    }

    async fn fetch_token(&self, boost: &TokenBoost, now_ms: i64) -> Option<RadarToken> {
        let lookup = self.feed.token_pairs(&boost.token_address);

        let pairs = match timeout(self.limits.request_timeout, lookup).await {
            Ok(Ok(pairs)) => pairs,
            Ok(Err(e)) => {
                warn!("⚠️  Pair lookup failed for {}:{}: {}", boost.chain_id, boost.token_address, e);
                return None;
            }
            Err(_) => {
                warn!(
                    "⚠️  Pair lookup timed out for {}:{} after {:?}",
                    boost.chain_id, boost.token_address, self.limits.request_timeout
                );
                return None;
            }
        };

        let Some(pair) = select_pair(&pairs, &boost.chain_id) else {
            debug!("No pairs listed for {}:{}", boost.chain_id, boost.token_address);
            return None;
        };

        Some(normalize_pair(boost, pair, now_ms))
    }
}

/// Keep the first occurrence of each `chainId:tokenAddress`, up to `limit`
///
/// Entries missing a chain id or address still count toward `limit`, then
/// are dropped, the same as a failed lookup.
pub fn dedupe_boosts(boosts: Vec<TokenBoost>, limit: usize) -> Vec<TokenBoost> {
    let mut seen = HashSet::new();

    boosts
        .into_iter()
        .filter(|b| seen.insert(format!("{}:{}", b.chain_id, b.token_address)))
        .take(limit)
        .filter(|b| {
            let usable = !b.chain_id.is_empty() && !b.token_address.is_empty();
            if !usable {
                debug!("Skipping discovery entry {:?}", b);
            }
            usable
        })
        .collect()
}

/// Pair on the requested chain, falling back to the first listed pair
pub fn select_pair<'a>(pairs: &'a [DexScreenerPair], chain_id: &str) -> Option<&'a DexScreenerPair> {
    pairs
        .iter()
        .find(|p| p.chain_id.as_deref().unwrap_or("") == chain_id)
        .or_else(|| pairs.first())
}

/// Extract metrics from a pair, absent fields read as zero
pub fn extract_metrics(pair: &DexScreenerPair, now_ms: i64) -> MarketMetrics {
    let counts = pair.txns.as_ref().and_then(|t| t.h24.as_ref());
    let count = |v: Option<f64>| v.unwrap_or(0.0).max(0.0) as u64;

    // A zero creation timestamp is treated as absent
    let pair_age_hours = match pair.pair_created_at {
        Some(created_at) if created_at != 0.0 => (now_ms as f64 - created_at) / MS_PER_HOUR,
        _ => 0.0,
    };

    MarketMetrics {
        liquidity_usd: pair.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0),
        volume_24h: pair.volume.as_ref().and_then(|v| v.h24).unwrap_or(0.0),
        price_change_24h: pair.price_change.as_ref().and_then(|p| p.h24).unwrap_or(0.0),
        buys_24h: count(counts.and_then(|c| c.buys)),
        sells_24h: count(counts.and_then(|c| c.sells)),
        pair_age_hours,
    }
}

/// Build the canonical radar record for a discovery entry and its pair
pub fn normalize_pair(boost: &TokenBoost, pair: &DexScreenerPair, now_ms: i64) -> RadarToken {
    let metrics = extract_metrics(pair, now_ms);
    let risk_flags = evaluate_risk_flags(&metrics);
    let tx_24h = metrics.tx_24h();

    let base = pair.base_token.as_ref();
    let symbol = base
        .and_then(|b| b.symbol.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "UNK".to_string());
    let name = base
        .and_then(|b| b.name.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    RadarToken {
        key: identity_key(&boost.chain_id, &boost.token_address),
        symbol,
        name,
        chain_id: boost.chain_id.clone(),
        token_address: boost.token_address.clone(),
        dex_url: format!("https://dexscreener.com/{}/{}", boost.chain_id, boost.token_address),
        liquidity_usd: metrics.liquidity_usd,
        volume_24h: metrics.volume_24h,
        price_change_24h: metrics.price_change_24h,
        tx_24h,
        pair_age_hours: metrics.pair_age_hours,
        momentum_score: momentum_score(metrics.volume_24h, tx_24h, metrics.price_change_24h),
        risk_flags,
    }
}
