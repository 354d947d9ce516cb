pub mod business;
pub mod columns;
pub mod costs;
pub mod search_terms;
pub mod table;

pub use business::summarize_revenue;
pub use costs::{load_costs, CostTable};
pub use search_terms::{load_search_terms, IngestStats};
pub use table::{read_table_file, Table};
#[cfg(test)]
pub use table::{read_table, TableFormat};

/// Numeric coercion shared by every loader: blank, unparseable and
/// non-finite cells all read as `None` so callers can zero-fill them.
pub fn coerce_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
