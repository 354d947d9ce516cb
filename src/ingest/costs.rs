use std::collections::HashMap;

use tracing::warn;

use super::coerce_number;
use super::table::Table;
use crate::error::{AppError, Result};
use crate::types::CostRecord;

const REQUIRED_COLUMNS: [&str; 5] = [
    "sku",
    "product_cost",
    "amazon_fees",
    "shipping",
    "selling_price",
];

/// Cost records keyed by SKU.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    by_sku: HashMap<String, CostRecord>,
}

impl CostTable {
    pub fn get(&self, sku: &str) -> Option<&CostRecord> {
        self.by_sku.get(sku)
    }

    pub fn len(&self) -> usize {
        self.by_sku.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sku.is_empty()
    }
}

impl FromIterator<CostRecord> for CostTable {
    fn from_iter<I: IntoIterator<Item = CostRecord>>(iter: I) -> Self {
        let mut by_sku = HashMap::new();
        for record in iter {
            by_sku.entry(record.sku.clone()).or_insert(record);
        }
        Self { by_sku }
    }
}

/// Parse a SKU cost sheet. Every cost column is required; blank or
/// non-numeric amounts read as 0. When a SKU repeats, the first row wins.
pub fn load_costs(table: &Table, file: &str) -> Result<CostTable> {
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = table
            .column_index(name)
            .ok_or_else(|| AppError::missing_column(file, name))?;
    }
    let [sku_idx, product_idx, fees_idx, shipping_idx, price_idx] = indices;

    let amount = |row: &[String], idx: usize| coerce_number(Table::cell(row, Some(idx))).unwrap_or(0.0);

    let records: Vec<CostRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let sku = Table::cell(row, Some(sku_idx)).trim();
            (!sku.is_empty()).then(|| CostRecord {
                sku: sku.to_string(),
                product_cost: amount(row, product_idx),
                amazon_fees: amount(row, fees_idx),
                shipping: amount(row, shipping_idx),
                selling_price: amount(row, price_idx),
            })
        })
        .collect();

    let parsed = records.len();
    let costs: CostTable = records.into_iter().collect();
    let duplicates = parsed - costs.len();
    if duplicates > 0 {
        warn!("[INGEST] {file}: {duplicates} duplicate SKU rows ignored (first occurrence kept)");
    }
    Ok(costs)
}
