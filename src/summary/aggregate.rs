use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics;
use crate::types::ClassifiedTerm;

/// Spend/sales rollup for one SKU or one search term cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub terms: usize,
    pub spend: f64,
    pub sales: f64,
    pub roas: f64,
    /// Present only in profit mode; rows that missed the cost join add 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    /// Spend of the group's Negative rows.
    pub waste_spend: f64,
    /// Spend of the group's Scale / High Potential rows.
    pub scale_spend: f64,
}

impl GroupSummary {
    fn empty(key: String, profit_mode: bool) -> Self {
        Self {
            key,
            terms: 0,
            spend: 0.0,
            sales: 0.0,
            roas: 0.0,
            profit: profit_mode.then_some(0.0),
            waste_spend: 0.0,
            scale_spend: 0.0,
        }
    }

    fn add(&mut self, term: &ClassifiedTerm) {
        let r = &term.record;
        self.terms += 1;
        self.spend += r.spend;
        self.sales += r.sales;
        if let (Some(total), Some(p)) = (self.profit.as_mut(), r.profit) {
            *total += p;
        }
        if term.action.is_negative() {
            self.waste_spend += r.spend;
        }
        if term.action.is_scale() {
            self.scale_spend += r.spend;
        }
    }
}

fn group_by<F>(terms: &[ClassifiedTerm], profit_mode: bool, key_of: F) -> Vec<GroupSummary>
where
    F: Fn(&ClassifiedTerm) -> Option<String>,
{
    let mut groups: BTreeMap<String, GroupSummary> = BTreeMap::new();
    for term in terms {
        let Some(key) = key_of(term) else { continue };
        groups
            .entry(key.clone())
            .or_insert_with(|| GroupSummary::empty(key, profit_mode))
            .add(term);
    }
    groups
        .into_values()
        .map(|mut g| {
            g.roas = metrics::roas(g.sales, g.spend);
            g
        })
        .collect()
}

/// Per-SKU rollup, ordered by SKU. Rows without a SKU are left out.
pub fn summarize_by_sku(terms: &[ClassifiedTerm], profit_mode: bool) -> Vec<GroupSummary> {
    group_by(terms, profit_mode, |t| t.record.sku.clone())
}

/// First two whitespace-separated tokens of a search term, lower-cased.
pub fn cluster_key(search_term: &str) -> String {
    search_term
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Rollup by search term cluster, best ROAS first (ties by cluster key).
pub fn summarize_by_cluster(terms: &[ClassifiedTerm], profit_mode: bool) -> Vec<GroupSummary> {
    let mut groups = group_by(terms, profit_mode, |t| Some(cluster_key(&t.record.search_term)));
    groups.sort_by(|a, b| b.roas.total_cmp(&a.roas));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionLabel, SearchTermRecord};

    fn term(search_term: &str, sku: Option<&str>, spend: f64, sales: f64, action: ActionLabel) -> ClassifiedTerm {
        let mut record = SearchTermRecord {
            search_term: search_term.to_string(),
            sku: sku.map(str::to_string),
            spend,
            sales,
            clicks: 10.0,
            impressions: 100.0,
            orders: 1.0,
            roas: 0.0,
            acos: 0.0,
            cpc: 0.0,
            ctr: 0.0,
            confidence: 0.0,
            profit: None,
            break_even_acos: None,
        };
        metrics::derive(&mut record, 0.0);
        ClassifiedTerm { record, action, bid: None }
    }

    #[test]
    fn cluster_key_takes_two_lowercase_tokens() {
        assert_eq!(cluster_key("Red  Running Shoes Men"), "red running");
        assert_eq!(cluster_key("Socks"), "socks");
        assert_eq!(cluster_key("   "), "");
    }

    #[test]
    fn sku_summary_sums_and_skips_missing_sku() {
        let terms = vec![
            term("a", Some("B"), 10.0, 40.0, ActionLabel::Scale),
            term("b", Some("A"), 5.0, 0.0, ActionLabel::Watch),
            term("c", Some("B"), 30.0, 20.0, ActionLabel::Harvest),
            term("d", None, 99.0, 0.0, ActionLabel::Watch),
        ];
        let summary = summarize_by_sku(&terms, false);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].key, "A");
        assert_eq!(summary[1].key, "B");
        assert_eq!(summary[1].terms, 2);
        assert_eq!(summary[1].spend, 40.0);
        assert_eq!(summary[1].sales, 60.0);
        assert!((summary[1].roas - 1.5).abs() < 1e-12);
        assert_eq!(summary[1].scale_spend, 10.0);
        assert_eq!(summary[0].roas, 0.0);
        assert!(summary[0].profit.is_none());
    }

    #[test]
    fn profit_mode_sums_known_profit() {
        let mut a = term("a", Some("A"), 10.0, 40.0, ActionLabel::Scale);
        a.record.profit = Some(12.0);
        let b = term("b", Some("A"), 10.0, 0.0, ActionLabel::Watch);
        let summary = summarize_by_sku(&[a, b], true);
        assert_eq!(summary[0].profit, Some(12.0));
    }

    #[test]
    fn clusters_sorted_by_roas_descending() {
        let terms = vec![
            term("blue socks wool", None, 10.0, 10.0, ActionLabel::Harvest),
            term("Red Shoes", None, 10.0, 50.0, ActionLabel::Scale),
            term("red shoes kids", None, 10.0, 10.0, ActionLabel::Harvest),
            term("green hat", None, 0.0, 0.0, ActionLabel::Watch),
        ];
        let clusters = summarize_by_cluster(&terms, false);
        let keys: Vec<_> = clusters.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["red shoes", "blue socks", "green hat"]);
        assert_eq!(clusters[0].terms, 2);
        assert!((clusters[0].roas - 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_roas_clusters_fall_back_to_key_order() {
        let terms = vec![
            term("zeta a", None, 10.0, 20.0, ActionLabel::Harvest),
            term("best seller", None, 10.0, 90.0, ActionLabel::Scale),
            term("alpha b", None, 10.0, 20.0, ActionLabel::Harvest),
            term("mid c", None, 10.0, 20.0, ActionLabel::Harvest),
        ];
        let clusters = summarize_by_cluster(&terms, false);
        let keys: Vec<_> = clusters.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["best seller", "alpha b", "mid c", "zeta a"]);
    }
}
