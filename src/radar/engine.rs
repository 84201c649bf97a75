//! Radar Engine - one opportunity snapshot per invocation
//!
//! ```text
//! MarketFeed
//!     ↓
//! RadarFetcher::fetch_radar()      (risk flags + momentum per token)
//!     ↓
//! WalletCorrelator::build_feed()   (top tokens, fetch order)
//!     ↓
//! OpportunityAggregator            (score, blend, dedupe, rank, alerts)
//!     ↓
//! OpportunitySnapshot
//! ```
//!
//! Nothing is carried between invocations: every snapshot builds fresh maps
//! and lists. The registry is the only shared data and it is read-only.

use super::aggregator::OpportunityAggregator;
use super::correlator::{WalletCorrelator, WALLET_REGISTRY};
use super::dexscreener::MarketFeed;
use super::fetcher::{FetchLimits, RadarFetcher};
use super::scorer::OpportunityScorer;
use super::types::OpportunitySnapshot;
use crate::config::RadarConfig;
use log::info;

pub struct RadarEngine<F> {
    fetcher: RadarFetcher<F>,
    correlator: WalletCorrelator,
    aggregator: OpportunityAggregator,

    /// Epoch-millisecond clock (for testing with mock time)
    now_fn: Box<dyn Fn() -> i64 + Send + Sync>,
}

impl<F: MarketFeed> RadarEngine<F> {
    /// Create an engine using system time (chrono::Utc::now())
    pub fn new(feed: F, config: &RadarConfig) -> Self {
        Self::new_with_timestamp_fn(
            feed,
            config,
            Box::new(|| chrono::Utc::now().timestamp_millis()),
        )
    }

    /// Create an engine with a custom clock
    ///
    /// Used for testing with deterministic timestamps.
    pub fn new_with_timestamp_fn(
        feed: F,
        config: &RadarConfig,
        now_fn: Box<dyn Fn() -> i64 + Send + Sync>,
    ) -> Self {
        let limits = FetchLimits {
            fanout: config.fanout_limit,
            max_tokens: config.max_radar_tokens,
            request_timeout: config.request_timeout(),
        };

        Self {
            fetcher: RadarFetcher::new(feed, limits),
            correlator: WalletCorrelator::new(&WALLET_REGISTRY, config.wallet_feed_size),
            aggregator: OpportunityAggregator::new(
                OpportunityScorer::with_defaults(),
                config.max_opportunities,
                config.alert_threshold,
            ),
            now_fn,
        }
    }

    pub fn feed(&self) -> &F {
        self.fetcher.feed()
    }

    /// Build a fresh snapshot
    ///
    /// Never fails: upstream errors surface only as shorter lists.
    pub async fn snapshot(&self) -> OpportunitySnapshot {
        let now = (self.now_fn)();

        let meme_radar = self.fetcher.fetch_radar(now).await;
        if meme_radar.is_empty() {
            info!("📭 Empty radar, returning empty snapshot");
            return OpportunitySnapshot::empty((self.now_fn)());
        }

        let wallet_feed = self.correlator.build_feed(&meme_radar, now);
        let opportunities = self.aggregator.build_opportunities(&meme_radar, &wallet_feed);
        let alerts = self.aggregator.derive_alerts(&opportunities);

        info!(
            "✅ Snapshot: {} radar, {} wallet events, {} opportunities, {} alerts",
            meme_radar.len(),
            wallet_feed.len(),
            opportunities.len(),
            alerts.len()
        );

        OpportunitySnapshot {
            generated_at: (self.now_fn)(),
            opportunities,
            wallet_feed,
            meme_radar,
            alerts,
        }
    }
}
