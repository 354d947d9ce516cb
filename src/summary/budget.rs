use serde::Serialize;

#[cfg(test)]
use super::aggregate::GroupSummary;
use crate::types::ClassifiedTerm;

/// Spend currently going to negated terms versus terms being scaled.
/// Informational only; nothing is reallocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BudgetPools {
    pub waste_pool: f64,
    pub scale_pool: f64,
}

impl BudgetPools {
    pub fn from_terms(terms: &[ClassifiedTerm]) -> Self {
        terms.iter().fold(Self::default(), |mut pools, t| {
            if t.action.is_negative() {
                pools.waste_pool += t.record.spend;
            }
            if t.action.is_scale() {
                pools.scale_pool += t.record.spend;
            }
            pools
        })
    }

    /// Same pools re-derived from a group rollup. Matches `from_terms` when
    /// every row belongs to some group.
    #[cfg(test)]
    pub fn from_groups(groups: &[GroupSummary]) -> Self {
        groups.iter().fold(Self::default(), |mut pools, g| {
            pools.waste_pool += g.waste_spend;
            pools.scale_pool += g.scale_spend;
            pools
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate::summarize_by_sku;
    use crate::types::{ActionLabel, SearchTermRecord};

    fn term(sku: &str, spend: f64, action: ActionLabel) -> ClassifiedTerm {
        ClassifiedTerm {
            record: SearchTermRecord {
                search_term: format!("term {sku}"),
                sku: Some(sku.to_string()),
                spend,
                sales: 0.0,
                clicks: 0.0,
                impressions: 0.0,
                orders: 0.0,
                roas: 0.0,
                acos: 0.0,
                cpc: 0.0,
                ctr: 0.0,
                confidence: 0.0,
                profit: None,
                break_even_acos: None,
            },
            action,
            bid: None,
        }
    }

    fn sample() -> Vec<ClassifiedTerm> {
        vec![
            term("A", 350.0, ActionLabel::Negative),
            term("A", 100.0, ActionLabel::Scale),
            term("B", 40.0, ActionLabel::Harvest),
            term("B", 25.0, ActionLabel::HighPotential),
            term("C", 500.0, ActionLabel::Negative),
            term("C", 7.0, ActionLabel::Loss),
        ]
    }

    #[test]
    fn pools_sum_spend_by_label() {
        let pools = BudgetPools::from_terms(&sample());
        assert_eq!(pools.waste_pool, 850.0);
        assert_eq!(pools.scale_pool, 125.0);
    }

    #[test]
    fn sku_rollup_reproduces_row_level_pools() {
        let terms = sample();
        let from_rows = BudgetPools::from_terms(&terms);
        let from_skus = BudgetPools::from_groups(&summarize_by_sku(&terms, false));
        assert_eq!(from_rows, from_skus);
    }
}
