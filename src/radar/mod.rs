//! # Opportunity Radar
//!
//! Turns third-party market feeds into a ranked list of trading opportunities.
//!
//! ## Pipeline
//!
//! ```text
//! DexScreener (boosts + pairs) → RadarFetcher → RadarToken (risk flags, momentum)
//!     ↓
//! WalletCorrelator (synthetic wallet activity)
//!     ↓
//! OpportunityAggregator (composite score, wallet blend, dedupe, rank)
//!     ↓
//! OpportunitySnapshot (+ alerts)
//! ```
//!
//! Identity is always `chainId:lowercased address`, never the ticker symbol.
//!
//! ## Module Organization
//!
//! - `types` - Radar, opportunity, wallet and alert records
//! - `dexscreener` - Upstream DTOs, `MarketFeed` trait, HTTP client
//! - `cache` - TTL cache in front of a `MarketFeed`
//! - `risk` - Risk flag evaluation
//! - `scorer` - Momentum score and composite scorer
//! - `fetcher` - Discovery + concurrent pair enrichment
//! - `correlator` - Wallet registry and activity feed
//! - `aggregator` - Opportunity ranking and alerts
//! - `engine` - Snapshot orchestration

pub mod types;
pub mod dexscreener;
pub mod cache;
pub mod risk;
pub mod scorer;
pub mod fetcher;
pub mod correlator;
pub mod aggregator;
pub mod engine;

// Re-export commonly used types
pub use types::{
    AlertEvent, Opportunity, OpportunitySnapshot, RadarToken, RiskFlag, ScoreBreakdown,
    WalletActivityEvent, WalletTag,
};
pub use dexscreener::{DexScreenerClient, FeedError, MarketFeed};
pub use cache::CachedFeed;
pub use scorer::{OpportunityScorer, ScoringWeights};
pub use fetcher::{FetchLimits, RadarFetcher};
pub use correlator::{WalletCorrelator, WALLET_REGISTRY};
pub use aggregator::OpportunityAggregator;
pub use engine::RadarEngine;
