//! Momentum and quality scoring for radar tokens

use super::types::{RadarToken, ScoreBreakdown};

/// Round half up, matching the rounding used for every published score
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Launch momentum seen at fetch time (0-100)
///
/// `volume/200k × 40 + tx/300 × 30 + max(change, 0) × 1.2`, clamped then rounded.
pub fn momentum_score(volume_24h: f64, tx_24h: u64, price_change_24h: f64) -> u32 {
    let raw = (volume_24h / 200_000.0) * 40.0
        + (tx_24h as f64 / 300.0) * 30.0
        + price_change_24h.max(0.0) * 1.2;

    round_half_up(raw.clamp(0.0, 100.0)) as u32
}

/// Weights of the composite score
///
/// Risk is subtracted, the other three are added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub smart_wallet: f64,
    pub launch_momentum: f64,
    pub liquidity_quality: f64,
    pub risk_deduction: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            smart_wallet: 0.35,
            launch_momentum: 0.30,
            liquidity_quality: 0.20,
            risk_deduction: 0.15,
        }
    }
}

/// Base (pre-correlation) score of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredToken {
    /// 0-100
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

pub struct OpportunityScorer {
    weights: ScoringWeights,
}

impl OpportunityScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Compute the four sub-scores and the weighted composite
    ///
    /// # Factors
    /// - Liquidity quality: liquidity relative to $250k
    /// - Launch momentum: volume, trade count, positive price change
    /// - Risk deduction: 12 per risk flag, +8 for pairs under 2h old (max 65)
    /// - Smart wallet: placeholder derived from momentum score, replaced
    ///   after wallet correlation
    ///
    /// Sub-scores are weighted unrounded; rounding only happens on output.
    pub fn score(&self, token: &RadarToken) -> ScoredToken {
        let liquidity_quality = ((token.liquidity_usd / 250_000.0) * 100.0).clamp(0.0, 100.0);

        let launch_momentum = ((token.volume_24h / 300_000.0) * 45.0
            + token.tx_24h as f64 / 40.0
            + token.price_change_24h.max(0.0) * 0.9)
            .clamp(0.0, 100.0);

        let new_pair_penalty = if token.pair_age_hours < 2.0 { 8.0 } else { 0.0 };
        let risk_deduction =
            (token.risk_flags.len() as f64 * 12.0 + new_pair_penalty).clamp(0.0, 65.0);

        let smart_wallet = (35.0 + token.momentum_score as f64 * 0.45).clamp(0.0, 100.0);

        let weighted = smart_wallet * self.weights.smart_wallet
            + launch_momentum * self.weights.launch_momentum
            + liquidity_quality * self.weights.liquidity_quality
            - risk_deduction * self.weights.risk_deduction;

        ScoredToken {
            score: round_half_up(weighted).clamp(0.0, 100.0) as u32,
            breakdown: ScoreBreakdown {
                smart_wallet: round_half_up(smart_wallet) as u32,
                launch_momentum: round_half_up(launch_momentum) as u32,
                liquidity_quality: round_half_up(liquidity_quality) as u32,
                risk_deduction: round_half_up(risk_deduction) as u32,
            },
        }
    }
}
