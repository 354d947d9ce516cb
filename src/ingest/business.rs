use tracing::warn;

use super::coerce_number;
use super::table::Table;
use crate::config::BUSINESS_REVENUE_COLUMN;
use crate::types::BusinessRevenueSummary;

/// Reduce a business report to its total revenue. Returns `None` when the
/// report has no revenue column; TACOS is then skipped rather than failing
/// the run.
pub fn summarize_revenue(table: &Table, file: &str) -> Option<BusinessRevenueSummary> {
    let Some(idx) = table.column_index(BUSINESS_REVENUE_COLUMN) else {
        warn!("[INGEST] {file}: no '{BUSINESS_REVENUE_COLUMN}' column, TACOS skipped");
        return None;
    };

    let total_revenue = table
        .rows
        .iter()
        .filter_map(|row| coerce_number(Table::cell(row, Some(idx))))
        .sum();
    Some(BusinessRevenueSummary { total_revenue })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::table::{read_table, TableFormat};

    #[test]
    fn sums_revenue_column() {
        let table = read_table(
            "Date,Total Sales\n2024-01-01,1000\n2024-01-02,250.5\n2024-01-03,bad\n".as_bytes(),
            TableFormat::Csv,
        )
        .unwrap();
        let summary = summarize_revenue(&table, "business.csv").unwrap();
        assert!((summary.total_revenue - 1250.5).abs() < 1e-9);
    }

    #[test]
    fn missing_column_skips_tacos() {
        let table = read_table("Date,Ordered Product Sales\nx,1\n".as_bytes(), TableFormat::Csv).unwrap();
        assert!(summarize_revenue(&table, "business.csv").is_none());
    }
}
