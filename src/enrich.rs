use serde::Serialize;

use crate::ingest::CostTable;
use crate::types::{BusinessRevenueSummary, SearchTermRecord};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub matched: usize,
    pub unmatched: usize,
}

/// Left-join cost records onto search terms by SKU.
///
/// Matched rows get `profit = sales - spend - orders * total_cost` and the
/// SKU's break-even ACOS. Unmatched rows keep `None` in both so the Loss rule
/// cannot fire for them and the default breakeven applies.
pub fn apply_costs(records: &mut [SearchTermRecord], costs: &CostTable, target_acos: f64) -> JoinStats {
    let mut stats = JoinStats::default();
    for record in records.iter_mut() {
        let cost = record.sku.as_deref().and_then(|sku| costs.get(sku));
        match cost {
            Some(cost) => {
                record.profit = Some(record.sales - record.spend - record.orders * cost.total_cost());
                record.break_even_acos = Some(cost.break_even_acos(target_acos));
                stats.matched += 1;
            }
            None => {
                record.profit = None;
                record.break_even_acos = None;
                stats.unmatched += 1;
            }
        }
    }
    stats
}

/// Total advertising cost of sale: ad spend over all business revenue.
pub fn tacos(total_spend: f64, revenue: &BusinessRevenueSummary) -> f64 {
    if revenue.total_revenue > 0.0 {
        total_spend / revenue.total_revenue
    } else {
        0.0
    }
}
