use serde::Serialize;
use tracing::{debug, warn};

use super::coerce_number;
use super::columns::{ColumnResolver, Field, ResolvedColumns};
use super::table::Table;
use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::types::SearchTermRecord;

const NUMERIC_FIELDS: [Field; 5] = [
    Field::Spend,
    Field::Sales,
    Field::Clicks,
    Field::Impressions,
    Field::Orders,
];

/// Columns the strict variant refuses to run without.
const STRICT_FIELDS: [Field; 4] = [Field::Spend, Field::Sales, Field::Clicks, Field::Impressions];

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct IngestStats {
    pub rows: usize,
    /// Non-empty numeric cells that could not be parsed and were read as 0.
    pub coerced_cells: usize,
    pub rows_without_sku: usize,
    /// Semantic columns absent from the file and zero-filled.
    pub missing_columns: Vec<&'static str>,
}

/// Build search term records from a parsed report. `file` names the source
/// in error messages.
pub fn load_search_terms(
    table: &Table,
    settings: &Settings,
    file: &str,
) -> Result<(Vec<SearchTermRecord>, IngestStats)> {
    let profile = settings.profile();
    let resolver = ColumnResolver::search_term_report();
    let columns = resolver.resolve(&table.headers);

    let required: &[Field] = if profile.strict_columns {
        &STRICT_FIELDS
    } else {
        &[Field::Sales]
    };
    for &field in required {
        if !columns.has(field) {
            let column = resolver
                .rule(field)
                .map(|r| r.matcher.describe())
                .unwrap_or(field.name());
            return Err(AppError::missing_column(file, column));
        }
    }

    let mut stats = IngestStats::default();
    for field in NUMERIC_FIELDS.iter().chain([Field::SearchTerm, Field::Sku].iter()) {
        if !columns.has(*field) {
            stats.missing_columns.push(field.name());
        }
    }
    for name in &stats.missing_columns {
        if *name == Field::Sku.name() {
            debug!("[INGEST] {file}: no advertised sku column, SKU views disabled");
        } else {
            warn!("[INGEST] {file}: column '{name}' not found, reading as empty");
        }
    }

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let record = build_record(row, &columns, &mut stats, profile.acos_without_sales);
        if record.sku.is_none() {
            stats.rows_without_sku += 1;
        }
        records.push(record);
    }
    stats.rows = records.len();

    if stats.coerced_cells > 0 {
        warn!(
            coerced_cells = stats.coerced_cells,
            "[INGEST] {file}: {} non-numeric cells read as 0",
            stats.coerced_cells
        );
    }
    Ok((records, stats))
}

fn build_record(
    row: &[String],
    columns: &ResolvedColumns,
    stats: &mut IngestStats,
    acos_without_sales: f64,
) -> SearchTermRecord {
    let mut number = |field: Field| -> f64 {
        let cell = Table::cell(row, columns.index(field));
        match coerce_number(cell) {
            Some(v) => v,
            None => {
                if !cell.trim().is_empty() {
                    stats.coerced_cells += 1;
                }
                0.0
            }
        }
    };

    let spend = number(Field::Spend);
    let sales = number(Field::Sales);
    let clicks = number(Field::Clicks);
    let impressions = number(Field::Impressions);
    let orders = number(Field::Orders);

    let sku = Table::cell(row, columns.index(Field::Sku)).trim();
    let mut record = SearchTermRecord {
        search_term: Table::cell(row, columns.index(Field::SearchTerm)).trim().to_string(),
        sku: (!sku.is_empty()).then(|| sku.to_string()),
        spend,
        sales,
        clicks,
        impressions,
        orders,
        roas: 0.0,
        acos: 0.0,
        cpc: 0.0,
        ctr: 0.0,
        confidence: 0.0,
        profit: None,
        break_even_acos: None,
    };
    metrics::derive(&mut record, acos_without_sales);
    record
}
