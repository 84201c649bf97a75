//! Risk flag evaluation
//!
//! Flags are evaluated in a fixed order and emitted in that order.

use super::types::{MarketMetrics, RiskFlag};

pub const LOW_LIQUIDITY_USD: f64 = 50_000.0;
pub const VERY_NEW_PAIR_HOURS: f64 = 3.0;
pub const ONE_SIDED_MAX_RATIO: f64 = 4.0;
pub const ONE_SIDED_MIN_RATIO: f64 = 0.25;
pub const EXTREME_VOLATILITY_PCT: f64 = 45.0;

/// Derive risk flags from raw pair metrics
///
/// - `low_liquidity`: liquidity below $50k
/// - `very_new_pair`: pair younger than 3 hours
/// - `one_sided_flow`: buy/sell ratio above 4 or below 0.25 (only when there were trades)
/// - `extreme_volatility`: 24h price move beyond ±45%
pub fn evaluate_risk_flags(metrics: &MarketMetrics) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    if metrics.liquidity_usd < LOW_LIQUIDITY_USD {
        flags.push(RiskFlag::LowLiquidity);
    }

    if metrics.pair_age_hours < VERY_NEW_PAIR_HOURS {
        flags.push(RiskFlag::VeryNewPair);
    }

    if metrics.tx_24h() > 0 {
        let ratio = metrics.buys_24h as f64 / metrics.sells_24h.max(1) as f64;
        if ratio > ONE_SIDED_MAX_RATIO || ratio < ONE_SIDED_MIN_RATIO {
            flags.push(RiskFlag::OneSidedFlow);
        }
    }

    if metrics.price_change_24h.abs() > EXTREME_VOLATILITY_PCT {
        flags.push(RiskFlag::ExtremeVolatility);
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_metrics() -> MarketMetrics {
        MarketMetrics {
            liquidity_usd: 120_000.0,
            volume_24h: 400_000.0,
            price_change_24h: 12.0,
            buys_24h: 300,
            sells_24h: 200,
            pair_age_hours: 36.0,
        }
    }

    #[test]
    fn test_all_flags_in_order() {
        let metrics = MarketMetrics {
            liquidity_usd: 40_000.0,
            volume_24h: 10_000.0,
            price_change_24h: -50.0,
            buys_24h: 10,
            sells_24h: 100,
            pair_age_hours: 1.0,
        };

        assert_eq!(
            evaluate_risk_flags(&metrics),
            vec![
                RiskFlag::LowLiquidity,
                RiskFlag::VeryNewPair,
                RiskFlag::OneSidedFlow,
                RiskFlag::ExtremeVolatility,
            ]
        );
    }

    #[test]
    fn test_healthy_token_has_no_flags() {
        assert!(evaluate_risk_flags(&healthy_metrics()).is_empty());
    }

    #[test]
    fn test_one_sided_flow_boundaries() {
        // Exactly 4:1 is not flagged, only strictly above
        let mut metrics = MarketMetrics { buys_24h: 400, sells_24h: 100, ..healthy_metrics() };
        assert!(evaluate_risk_flags(&metrics).is_empty());

        metrics.buys_24h = 401;
        assert_eq!(evaluate_risk_flags(&metrics), vec![RiskFlag::OneSidedFlow]);

        // Buys with zero sells divide by one
        metrics.buys_24h = 5;
        metrics.sells_24h = 0;
        assert_eq!(evaluate_risk_flags(&metrics), vec![RiskFlag::OneSidedFlow]);
    }

    #[test]
    fn test_one_sided_sell_boundary() {
        // Exactly 1:4 is not flagged, only strictly below
        let mut metrics = MarketMetrics { buys_24h: 25, sells_24h: 100, ..healthy_metrics() };
        assert!(evaluate_risk_flags(&metrics).is_empty());

        metrics.buys_24h = 24;
        assert_eq!(evaluate_risk_flags(&metrics), vec![RiskFlag::OneSidedFlow]);
    }

    #[test]
    fn test_no_trades_is_not_one_sided() {
        let metrics = MarketMetrics { buys_24h: 0, sells_24h: 0, ..healthy_metrics() };
        assert!(evaluate_risk_flags(&metrics).is_empty());
    }

    #[test]
    fn test_volatility_and_age_thresholds_are_strict() {
        let metrics = MarketMetrics {
            price_change_24h: 45.0,
            pair_age_hours: 3.0,
            liquidity_usd: 50_000.0,
            ..healthy_metrics()
        };
        assert!(evaluate_risk_flags(&metrics).is_empty());
    }
}
