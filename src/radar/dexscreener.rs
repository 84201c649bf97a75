//! DexScreener API Integration
//!
//! Provides the two upstream feeds the radar is built from:
//! - Boosted token discovery (chain id + contract address pairs)
//! - Per-token pair metadata (liquidity, volume, price change, txns, age)
//!
//! ## API Reference
//!
//! Discovery: https://api.dexscreener.com/token-boosts/latest/v1
//! Returns: Array of `{ chainId, tokenAddress, ... }`
//!
//! Pairs: https://api.dexscreener.com/latest/dex/tokens/{tokenAddress}
//! Returns: `{ "pairs": [...] | null }`
//!
//! Numeric fields are decoded leniently: numbers, numeric strings and nulls
//! are all accepted, anything unusable becomes `None` and is later read as zero.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use alphaflow::radar::dexscreener::{DexScreenerClient, MarketFeed};
//!
//! let client = DexScreenerClient::new("https://api.dexscreener.com", Duration::from_secs(10))?;
//! let boosts = client.latest_boosts().await?;
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.dexscreener.com";

#[derive(Debug)]
pub enum FeedError {
    Http(reqwest::Error),
    Status(u16),
    Decode(serde_json::Error),
    Timeout,
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout
        } else {
            FeedError::Http(err)
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Decode(err)
    }
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Http(e) => write!(f, "HTTP error: {}", e),
            FeedError::Status(code) => write!(f, "DexScreener API error: status {}", code),
            FeedError::Decode(e) => write!(f, "Decode error: {}", e),
            FeedError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Accept a JSON number, a numeric string, or null
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Accept a string or null; null and non-string values read as empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Discovery feed entry
///
/// An empty chain id or address marks an unusable entry; it is dropped
/// by the fetcher rather than failing the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenBoost {
    #[serde(rename = "chainId", default, deserialize_with = "lenient_string")]
    pub chain_id: String,
    #[serde(rename = "tokenAddress", default, deserialize_with = "lenient_string")]
    pub token_address: String,
}

/// DexScreener pair response structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexScreenerPair {
    #[serde(rename = "chainId", default)]
    pub chain_id: Option<String>,
    #[serde(rename = "pairCreatedAt", default, deserialize_with = "lenient_number")]
    pub pair_created_at: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub volume: Option<Window24h>,
    #[serde(rename = "priceChange", default)]
    pub price_change: Option<Window24h>,
    #[serde(default)]
    pub txns: Option<Txns>,
    #[serde(rename = "baseToken", default)]
    pub base_token: Option<BaseToken>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Liquidity {
    #[serde(default, deserialize_with = "lenient_number")]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Window24h {
    #[serde(default, deserialize_with = "lenient_number")]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Txns {
    #[serde(default)]
    pub h24: Option<TxnCounts>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnCounts {
    #[serde(default, deserialize_with = "lenient_number")]
    pub buys: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sells: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseToken {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PairsResponse {
    #[serde(default)]
    pairs: Option<Vec<DexScreenerPair>>,
}

/// Upstream market data source
///
/// Implemented by the live DexScreener client, the response cache, and
/// in-memory feeds in tests.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Latest boosted tokens from the discovery feed
    async fn latest_boosts(&self) -> Result<Vec<TokenBoost>, FeedError>;

    /// All pairs listed for a token address (possibly empty)
    async fn token_pairs(&self, token_address: &str) -> Result<Vec<DexScreenerPair>, FeedError>;
}

/// HTTP client for the DexScreener public API
pub struct DexScreenerClient {
    client: reqwest::Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MarketFeed for DexScreenerClient {
    async fn latest_boosts(&self) -> Result<Vec<TokenBoost>, FeedError> {
        self.get_json("/token-boosts/latest/v1").await
    }

    async fn token_pairs(&self, token_address: &str) -> Result<Vec<DexScreenerPair>, FeedError> {
        let path = format!("/latest/dex/tokens/{}", token_address);
        let response: PairsResponse = self.get_json(&path).await?;
        Ok(response.pairs.unwrap_or_default())
    }
}
