use crate::types::{ActionLabel, SearchTermRecord, Strategy};

/// How a variant turns a classified row into a keyword bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidModel {
    /// Scale rows bid CPC × 1.1.
    Flat,
    /// Scale rows bid CPC × 1.2 under Growth, × 1.1 otherwise.
    StrategyUplift,
    /// Every row gets a bid; Scale rows are weighted up by confidence.
    ConfidenceWeighted,
}

pub mod multipliers {
    pub const UPLIFT: f64 = 1.1;
    pub const GROWTH_UPLIFT: f64 = 1.2;
    pub const HARVEST: f64 = 1.0;
    pub const DEFENSIVE: f64 = 0.8;
    /// Confidence (0-100) divided by this gives the extra Scale uplift.
    pub const CONFIDENCE_DIVISOR: f64 = 200.0;
}

/// Suggested bid for a row, rounded to cents. `None` when the model has no
/// bid for this action.
pub fn suggested_bid(
    record: &SearchTermRecord,
    action: ActionLabel,
    model: BidModel,
    strategy: Strategy,
) -> Option<f64> {
    use multipliers::*;

    let multiplier = match model {
        BidModel::Flat => action.is_scale().then_some(UPLIFT)?,
        BidModel::StrategyUplift => {
            if !action.is_scale() {
                return None;
            }
            if strategy == Strategy::Growth {
                GROWTH_UPLIFT
            } else {
                UPLIFT
            }
        }
        BidModel::ConfidenceWeighted => {
            if action.is_scale() {
                1.0 + record.confidence / CONFIDENCE_DIVISOR
            } else if action.is_harvest() {
                HARVEST
            } else {
                DEFENSIVE
            }
        }
    };
    Some(round_cents(record.cpc * multiplier))
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
