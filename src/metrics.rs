//! Row-local advertising ratios. Every ratio collapses to a fixed default
//! when its denominator is zero, so nothing downstream sees NaN or infinity.

use crate::config::CONFIDENCE_FULL_CLICKS;
use crate::types::SearchTermRecord;

#[inline]
fn guarded_ratio(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        fallback
    }
}

pub fn roas(sales: f64, spend: f64) -> f64 {
    guarded_ratio(sales, spend, 0.0)
}

/// `without_sales` is what a row with no sales reports; the variants disagree
/// on whether that is 0 or 1.
pub fn acos(spend: f64, sales: f64, without_sales: f64) -> f64 {
    guarded_ratio(spend, sales, without_sales)
}

pub fn cpc(spend: f64, clicks: f64) -> f64 {
    guarded_ratio(spend, clicks, 0.0)
}

pub fn ctr(clicks: f64, impressions: f64) -> f64 {
    guarded_ratio(clicks, impressions, 0.0)
}

/// Sample-size proxy: linear in clicks, saturating at 100.
pub fn confidence(clicks: f64) -> f64 {
    (clicks / CONFIDENCE_FULL_CLICKS * 100.0).clamp(0.0, 100.0)
}

/// Fill in every derived ratio from the raw counters already on the record.
pub fn derive(record: &mut SearchTermRecord, acos_without_sales: f64) {
    record.roas = roas(record.sales, record.spend);
    record.acos = acos(record.spend, record.sales, acos_without_sales);
    record.cpc = cpc(record.spend, record.clicks);
    record.ctr = ctr(record.clicks, record.impressions);
    record.confidence = confidence(record.clicks);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_divide_when_denominator_positive() {
        assert!((roas(400.0, 100.0) - 4.0).abs() < 1e-12);
        assert!((acos(100.0, 400.0, 0.0) - 0.25).abs() < 1e-12);
        assert!((cpc(100.0, 50.0) - 2.0).abs() < 1e-12);
        assert!((ctr(50.0, 1000.0) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn zero_denominators_use_fallback() {
        assert_eq!(roas(400.0, 0.0), 0.0);
        assert_eq!(cpc(10.0, 0.0), 0.0);
        assert_eq!(ctr(3.0, 0.0), 0.0);
        assert_eq!(acos(10.0, 0.0, 0.0), 0.0);
        assert_eq!(acos(10.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn confidence_saturates() {
        assert_eq!(confidence(0.0), 0.0);
        assert!((confidence(25.0) - 50.0).abs() < 1e-12);
        assert_eq!(confidence(50.0), 100.0);
        assert_eq!(confidence(500.0), 100.0);
        assert_eq!(confidence(-4.0), 0.0);
    }

    #[test]
    fn derive_fills_all_ratios() {
        let mut record = SearchTermRecord {
            search_term: "red shoes".to_string(),
            sku: None,
            spend: 100.0,
            sales: 0.0,
            clicks: 50.0,
            impressions: 0.0,
            orders: 0.0,
            roas: -1.0,
            acos: -1.0,
            cpc: -1.0,
            ctr: -1.0,
            confidence: -1.0,
            profit: None,
            break_even_acos: None,
        };
        derive(&mut record, 1.0);
        assert_eq!(record.roas, 0.0);
        assert_eq!(record.acos, 1.0);
        assert!((record.cpc - 2.0).abs() < 1e-12);
        assert_eq!(record.ctr, 0.0);
        assert_eq!(record.confidence, 100.0);
    }
}
