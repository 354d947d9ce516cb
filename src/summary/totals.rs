use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics;
use crate::types::ClassifiedTerm;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineTotals {
    pub rows: usize,
    pub total_spend: f64,
    pub total_sales: f64,
    pub roas: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tacos: Option<f64>,
    /// Row count per action label, keyed by display name.
    pub label_counts: BTreeMap<String, usize>,
}

impl HeadlineTotals {
    pub fn from_terms(terms: &[ClassifiedTerm], profit_mode: bool) -> Self {
        let total_spend: f64 = terms.iter().map(|t| t.record.spend).sum();
        let total_sales: f64 = terms.iter().map(|t| t.record.sales).sum();
        let total_profit =
            profit_mode.then(|| terms.iter().filter_map(|t| t.record.profit).sum::<f64>());

        let mut label_counts = BTreeMap::new();
        for t in terms {
            *label_counts.entry(t.action.to_string()).or_insert(0) += 1;
        }

        Self {
            rows: terms.len(),
            total_spend,
            total_sales,
            roas: metrics::roas(total_sales, total_spend),
            total_profit,
            tacos: None,
            label_counts,
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.label_counts.get(label).copied().unwrap_or(0)
    }
}
