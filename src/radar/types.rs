//! Core data types for the opportunity radar
//!
//! Every record here is built fresh per snapshot and never mutated afterwards.
//! Field names serialize in camelCase to match the public JSON document.

use serde::{Deserialize, Serialize};

/// Build the identity key for a token: `<chainId>:<lowercased address>`
///
/// Used for deduplication instead of the ticker symbol, which collides
/// freely across chains.
pub fn identity_key(chain_id: &str, token_address: &str) -> String {
    format!("{}:{}", chain_id, token_address.to_lowercase())
}

/// Named risk signal derived from raw market metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    LowLiquidity,
    VeryNewPair,
    OneSidedFlow,
    ExtremeVolatility,
}

/// Raw per-pair metrics extracted at the fetch boundary
///
/// Absent upstream fields have already been coerced to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketMetrics {
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    pub price_change_24h: f64,
    pub buys_24h: u64,
    pub sells_24h: u64,
    pub pair_age_hours: f64,
}

impl MarketMetrics {
    pub fn tx_24h(&self) -> u64 {
        self.buys_24h + self.sells_24h
    }
}

/// Candidate token surfaced by the discovery feed, enriched with pair data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarToken {
    pub key: String,
    pub symbol: String,
    pub name: String,
    pub chain_id: String,
    pub token_address: String,
    pub dex_url: String,
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    pub price_change_24h: f64,
    pub tx_24h: u64,
    pub pair_age_hours: f64,
    /// 0-100
    pub momentum_score: u32,
    pub risk_flags: Vec<RiskFlag>,
}

/// Sub-scores behind a composite score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub smart_wallet: u32,
    pub launch_momentum: u32,
    pub liquidity_quality: u32,
    /// 0-65
    pub risk_deduction: u32,
}

/// Tracked wallet category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletTag {
    Sniper,
    Swing,
    Momentum,
    SmartMoney,
}

/// Static reference entry for a tracked wallet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalletRegistryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub tag: WalletTag,
    pub quality_score: u32,
    pub win_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Synthetic observation tying a registry wallet to a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletActivityEvent {
    pub wallet_id: String,
    pub wallet_name: String,
    pub tag: WalletTag,
    /// Token symbol
    pub token: String,
    pub side: TradeSide,
    pub size_usd: u64,
    pub quality_score: u32,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Ranked output unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub key: String,
    pub symbol: String,
    pub chain_id: String,
    pub token_address: String,
    pub dex_url: String,
    pub score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub risk_flags: Vec<RiskFlag>,
    pub wallets_involved: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighScore,
}

/// Projection of an opportunity whose score cleared the alert threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub key: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub symbol: String,
    pub score: u32,
}

impl AlertEvent {
    pub fn high_score(opportunity: &Opportunity) -> Self {
        Self {
            key: format!("{}:high-score", opportunity.key),
            alert_type: AlertType::HighScore,
            symbol: opportunity.symbol.clone(),
            score: opportunity.score,
        }
    }
}

/// One full response of the read endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunitySnapshot {
    /// Epoch milliseconds
    pub generated_at: i64,
    pub opportunities: Vec<Opportunity>,
    pub wallet_feed: Vec<WalletActivityEvent>,
    pub meme_radar: Vec<RadarToken>,
    pub alerts: Vec<AlertEvent>,
}

impl OpportunitySnapshot {
    /// Snapshot with no data, returned when discovery fails
    pub fn empty(generated_at: i64) -> Self {
        Self {
            generated_at,
            opportunities: Vec::new(),
            wallet_feed: Vec::new(),
            meme_radar: Vec::new(),
            alerts: Vec::new(),
        }
    }
}
