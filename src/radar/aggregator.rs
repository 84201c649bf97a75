//! Opportunity aggregation: scoring, wallet blending, dedupe, ranking
//!
//! ```text
//! RadarToken ──► OpportunityScorer (base score)
//!     │
//!     ├──► wallet events matched by symbol ──► wallet boost (avg quality, 40..95)
//!     ▼
//! final = base × 0.7 + boost × 0.3
//!     ▼
//! dedupe by chain:contract (higher score wins, first seen on tie)
//!     ▼
//! stable sort by score desc, truncate
//! ```

use super::scorer::{round_half_up, OpportunityScorer};
use super::types::{AlertEvent, Opportunity, RadarToken, WalletActivityEvent};
use log::debug;
use std::collections::HashMap;

pub const WALLET_BOOST_FLOOR: f64 = 40.0;
pub const WALLET_BOOST_CEILING: f64 = 95.0;
const BASE_SHARE: f64 = 0.7;
const WALLET_SHARE: f64 = 0.3;

/// Average quality of the correlated wallets, clamped to [40, 95]
///
/// No correlated wallets averages to zero and lands on the floor.
pub fn wallet_boost(events: &[&WalletActivityEvent]) -> f64 {
    let total: f64 = events.iter().map(|e| e.quality_score as f64).sum();
    let average = total / events.len().max(1) as f64;

    average.clamp(WALLET_BOOST_FLOOR, WALLET_BOOST_CEILING)
}

/// Keyed opportunity set preserving first-insertion order
///
/// A replacement takes over the slot of the entry it replaces, so ties in the
/// final sort resolve by when a key was first seen.
#[derive(Debug, Default)]
struct DedupeTable {
    slots: Vec<Opportunity>,
    index: HashMap<String, usize>,
}

impl DedupeTable {
    /// Insert, keeping whichever entry has the strictly higher score
    fn offer(&mut self, opportunity: Opportunity) {
        match self.index.get(&opportunity.key) {
            Some(&slot) => {
                let existing = &mut self.slots[slot];
                if opportunity.score > existing.score {
                    debug!(
                        "Replacing {} ({} → {})",
                        opportunity.key, existing.score, opportunity.score
                    );
                    *existing = opportunity;
                }
            }
            None => {
                self.index.insert(opportunity.key.clone(), self.slots.len());
                self.slots.push(opportunity);
            }
        }
    }

    fn into_values(self) -> Vec<Opportunity> {
        self.slots
    }
}

pub struct OpportunityAggregator {
    scorer: OpportunityScorer,
    max_opportunities: usize,
    alert_threshold: u32,
}

impl OpportunityAggregator {
    pub fn new(scorer: OpportunityScorer, max_opportunities: usize, alert_threshold: u32) -> Self {
        Self {
            scorer,
            max_opportunities,
            alert_threshold,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(OpportunityScorer::with_defaults(), 8, 70)
    }

    /// Join scored tokens with wallet activity and rank them
    ///
    /// # Arguments
    /// * `tokens` - Radar tokens in fetch order
    /// * `wallet_feed` - Correlated wallet events, matched to tokens by exact symbol
    ///
    /// # Returns
    /// At most `max_opportunities` entries, score-descending, unique by key
    pub fn build_opportunities(
        &self,
        tokens: &[RadarToken],
        wallet_feed: &[WalletActivityEvent],
    ) -> Vec<Opportunity> {
        let mut by_symbol: HashMap<&str, Vec<&WalletActivityEvent>> = HashMap::new();
        for event in wallet_feed {
            by_symbol.entry(event.token.as_str()).or_default().push(event);
        }

        let mut table = DedupeTable::default();

        for token in tokens {
            let scored = self.scorer.score(token);
            let wallets = by_symbol
                .get(token.symbol.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let boost = wallet_boost(wallets);

            let final_score = round_half_up(scored.score as f64 * BASE_SHARE + boost * WALLET_SHARE)
                .clamp(0.0, 100.0) as u32;

            let mut breakdown = scored.breakdown;
            breakdown.smart_wallet = round_half_up(boost) as u32;

            table.offer(Opportunity {
                key: token.key.clone(),
                symbol: token.symbol.clone(),
                chain_id: token.chain_id.clone(),
                token_address: token.token_address.clone(),
                dex_url: token.dex_url.clone(),
                score: final_score,
                score_breakdown: breakdown,
                risk_flags: token.risk_flags.clone(),
                wallets_involved: wallets.iter().map(|w| w.wallet_name.clone()).collect(),
            });
        }

        let mut ranked = table.into_values();
        // sort_by is stable: equal scores keep first-seen order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(self.max_opportunities);
        ranked
    }

    /// One `high_score` alert per opportunity at or above the threshold
    pub fn derive_alerts(&self, opportunities: &[Opportunity]) -> Vec<AlertEvent> {
        opportunities
            .iter()
            .filter(|o| o.score >= self.alert_threshold)
            .map(AlertEvent::high_score)
            .collect()
    }
}
