pub mod aggregate;
pub mod budget;
pub mod totals;

pub use aggregate::{summarize_by_cluster, summarize_by_sku, GroupSummary};
pub use budget::BudgetPools;
pub use totals::HeadlineTotals;
