use crate::config::Settings;
use crate::types::{ActionLabel, SearchTermRecord};

/// Assign an action to one search term. First matching rule wins:
///
/// 1. spend above the hard waste threshold with no sales → Negative
/// 2. profit mode and negative profit → Loss (ahead of rule 1 for the ai variant)
/// 3. ROAS at or above the breakeven threshold → Scale / High Potential
/// 4. any sales → Harvest / Low Potential
/// 5. otherwise → Watch / Neutral
///
/// The breakeven threshold is `1 / target_acos`, replaced in profit mode by
/// `1 / break_even_acos` when the row's SKU has a positive break-even ACOS,
/// then scaled by the strategy multiplier.
pub fn classify(record: &SearchTermRecord, settings: &Settings, profit_mode: bool) -> ActionLabel {
    let profile = settings.profile();

    let is_waste = record.spend > settings.waste_threshold && record.sales == 0.0;
    let is_loss = profit_mode && record.profit.is_some_and(|p| p < 0.0);

    if profile.loss_before_negative {
        if is_loss {
            return ActionLabel::Loss;
        }
        if is_waste {
            return ActionLabel::Negative;
        }
    } else {
        if is_waste {
            return ActionLabel::Negative;
        }
        if is_loss {
            return ActionLabel::Loss;
        }
    }

    let threshold = breakeven_roas(record, settings, profit_mode) * settings.strategy.threshold_multiplier();

    if record.roas >= threshold {
        profile.labels.scale
    } else if record.sales > 0.0 {
        profile.labels.harvest
    } else {
        profile.labels.watch
    }
}

/// Breakeven ROAS for a row before the strategy multiplier.
pub fn breakeven_roas(record: &SearchTermRecord, settings: &Settings, profit_mode: bool) -> f64 {
    match record.break_even_acos {
        Some(be_acos) if profit_mode && be_acos > 0.0 => 1.0 / be_acos,
        _ => settings.default_breakeven_roas(),
    }
}
