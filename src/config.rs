//! Radar configuration from environment variables

use crate::radar::dexscreener::DEFAULT_BASE_URL;
use std::env;
use std::time::Duration;

/// Configuration for the radar server
///
/// Loaded from environment variables with defaults matching the
/// published endpoint behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarConfig {
    /// Listen address for the HTTP server
    pub bind_addr: String,

    /// DexScreener API base URL
    pub dexscreener_base_url: String,

    /// Per-request upstream timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Upstream response cache TTL in seconds (0 disables)
    pub cache_ttl_secs: u64,

    /// Maximum per-token pair lookups per snapshot
    pub fanout_limit: usize,

    /// Maximum radar tokens returned
    pub max_radar_tokens: usize,

    /// Maximum opportunities returned
    pub max_opportunities: usize,

    /// Number of radar tokens correlated with wallets
    pub wallet_feed_size: usize,

    /// Minimum score that raises a high_score alert
    pub alert_threshold: u32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            dexscreener_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            cache_ttl_secs: 30,
            fanout_limit: 8,
            max_radar_tokens: 10,
            max_opportunities: 8,
            wallet_feed_size: 5,
            alert_threshold: 70,
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

impl RadarConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `RADAR_BIND_ADDR` (default: 0.0.0.0:3000)
    /// - `DEXSCREENER_BASE_URL` (default: https://api.dexscreener.com)
    /// - `RADAR_REQUEST_TIMEOUT_MS` (default: 10000)
    /// - `RADAR_CACHE_TTL_SECS` (default: 30)
    /// - `RADAR_FANOUT_LIMIT` (default: 8)
    /// - `RADAR_MAX_TOKENS` (default: 10)
    /// - `RADAR_MAX_OPPORTUNITIES` (default: 8)
    /// - `RADAR_WALLET_FEED_SIZE` (default: 5)
    /// - `RADAR_ALERT_THRESHOLD` (default: 70)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: env::var("RADAR_BIND_ADDR").unwrap_or(defaults.bind_addr),
            dexscreener_base_url: env::var("DEXSCREENER_BASE_URL")
                .unwrap_or(defaults.dexscreener_base_url),
            request_timeout_ms: parsed_var("RADAR_REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            cache_ttl_secs: parsed_var("RADAR_CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
            fanout_limit: parsed_var("RADAR_FANOUT_LIMIT").unwrap_or(defaults.fanout_limit),
            max_radar_tokens: parsed_var("RADAR_MAX_TOKENS").unwrap_or(defaults.max_radar_tokens),
            max_opportunities: parsed_var("RADAR_MAX_OPPORTUNITIES")
                .unwrap_or(defaults.max_opportunities),
            wallet_feed_size: parsed_var("RADAR_WALLET_FEED_SIZE")
                .unwrap_or(defaults.wallet_feed_size),
            alert_threshold: parsed_var("RADAR_ALERT_THRESHOLD").unwrap_or(defaults.alert_threshold),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
