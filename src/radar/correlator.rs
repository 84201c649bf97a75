//! Wallet correlation against the tracked-wallet registry
//!
//! The feed is synthetic: there is no on-chain wallet tracking behind it.
//! Registry wallets are assigned to the leading radar tokens round-robin,
//! so the same radar always produces the same feed (timestamps aside).

use super::scorer::round_half_up;
use super::types::{RadarToken, TradeSide, WalletActivityEvent, WalletRegistryEntry, WalletTag};

const MIN_SIZE_USD: f64 = 12_000.0;
const SIZE_LIQUIDITY_SHARE: f64 = 0.04;
const SIZE_STEP_USD: f64 = 2_200.0;
const EVENT_SPACING_MS: i64 = 6 * 60 * 1000;

/// Tracked wallets, process-wide and read-only
pub static WALLET_REGISTRY: [WalletRegistryEntry; 4] = [
    WalletRegistryEntry {
        id: "w1",
        name: "ApexFlow",
        tag: WalletTag::SmartMoney,
        quality_score: 86,
        win_rate: 62,
    },
    WalletRegistryEntry {
        id: "w2",
        name: "SolSniper-9",
        tag: WalletTag::Sniper,
        quality_score: 79,
        win_rate: 58,
    },
    WalletRegistryEntry {
        id: "w3",
        name: "MomoRotate",
        tag: WalletTag::Momentum,
        quality_score: 74,
        win_rate: 55,
    },
    WalletRegistryEntry {
        id: "w4",
        name: "BlueWhale-R",
        tag: WalletTag::Swing,
        quality_score: 83,
        win_rate: 60,
    },
];

pub struct WalletCorrelator {
    registry: &'static [WalletRegistryEntry],
    feed_size: usize,
}

impl WalletCorrelator {
    pub fn new(registry: &'static [WalletRegistryEntry], feed_size: usize) -> Self {
        Self {
            registry,
            feed_size,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&WALLET_REGISTRY, 5)
    }

    /// Build the wallet activity feed for the leading radar tokens
    ///
    /// Tokens are taken in fetch order (not score order). For token `i`:
    /// - wallet: `registry[i % len]`
    /// - side: buy when the 24h change is non-negative, else sell
    /// - size: `max(liquidity × 4%, $12k) + i × $2.2k`
    /// - timestamp: `now − i × 6min`, so the feed is newest-first
    pub fn build_feed(&self, tokens: &[RadarToken], now_ms: i64) -> Vec<WalletActivityEvent> {
        if self.registry.is_empty() {
            return Vec::new();
        }

        tokens
            .iter()
            .take(self.feed_size)
            .enumerate()
            .map(|(i, token)| {
                let wallet = &self.registry[i % self.registry.len()];
                let side = if token.price_change_24h >= 0.0 {
                    TradeSide::Buy
                } else {
                    TradeSide::Sell
                };
                let size_usd = round_half_up(
                    (token.liquidity_usd * SIZE_LIQUIDITY_SHARE).max(MIN_SIZE_USD)
                        + i as f64 * SIZE_STEP_USD,
                ) as u64;

                WalletActivityEvent {
                    wallet_id: wallet.id.to_string(),
                    wallet_name: wallet.name.to_string(),
                    tag: wallet.tag,
                    token: token.symbol.clone(),
                    side,
                    size_usd,
                    quality_score: wallet.quality_score,
                    timestamp: now_ms - i as i64 * EVENT_SPACING_MS,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_token(symbol: &str, liquidity_usd: f64, price_change_24h: f64) -> RadarToken {
        RadarToken {
            key: format!("solana:{}", symbol.to_lowercase()),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            chain_id: "solana".to_string(),
            token_address: symbol.to_lowercase(),
            dex_url: String::new(),
            liquidity_usd,
            volume_24h: 0.0,
            price_change_24h,
            tx_24h: 0,
            pair_age_hours: 24.0,
            momentum_score: 0,
            risk_flags: Vec::new(),
        }
    }

    #[test]
    fn test_round_robin_assignment() {
        let tokens: Vec<RadarToken> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|s| create_test_token(s, 100_000.0, 1.0))
            .collect();

        let feed = WalletCorrelator::with_defaults().build_feed(&tokens, 1_000_000_000);

        assert_eq!(feed.len(), 5);
        let wallets: Vec<&str> = feed.iter().map(|e| e.wallet_id.as_str()).collect();
        assert_eq!(wallets, vec!["w1", "w2", "w3", "w4", "w1"]);
        let symbols: Vec<&str> = feed.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_side_size_and_timestamps() {
        let tokens = vec![
            create_test_token("UP", 1_000_000.0, 0.0),
            create_test_token("DOWN", 10_000.0, -3.5),
        ];

        let now = 1_700_000_000_000;
        let feed = WalletCorrelator::with_defaults().build_feed(&tokens, now);

        assert_eq!(feed[0].side, TradeSide::Buy);
        assert_eq!(feed[0].size_usd, 40_000);
        assert_eq!(feed[0].timestamp, now);
        assert_eq!(feed[0].quality_score, 86);

        assert_eq!(feed[1].side, TradeSide::Sell);
        // Liquidity share below the floor: 12k + 2.2k
        assert_eq!(feed[1].size_usd, 14_200);
        assert_eq!(feed[1].timestamp, now - 360_000);
        assert_eq!(feed[1].tag, WalletTag::Sniper);
    }

    #[test]
    fn test_empty_inputs() {
        let correlator = WalletCorrelator::with_defaults();
        assert!(correlator.build_feed(&[], 0).is_empty());

        let empty = WalletCorrelator::new(&[], 5);
        assert!(empty.build_feed(&[create_test_token("A", 0.0, 0.0)], 0).is_empty());
    }
}
