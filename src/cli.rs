use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_BASE_NAME, DEFAULT_BULK_OUTPUT, DEFAULT_TARGET_ACOS_PCT};
use crate::types::{Strategy, Variant};

/// Classify an advertising search term report and generate a bulk upload file.
///
/// Every flag can also be set through the environment variable shown.
#[derive(Debug, Clone, Parser)]
#[command(name = "ppc-bulk", version)]
pub struct Cli {
    /// Search term report (.csv or .xlsx)
    #[arg(long, env = "SEARCH_TERM_REPORT")]
    pub search_terms: Option<PathBuf>,

    /// Per-SKU cost file (.csv); enables profit mode
    #[arg(long, env = "SKU_COST_FILE")]
    pub sku_costs: Option<PathBuf>,

    /// Business report (.csv or .xlsx) with a "total sales" column, for TACOS
    #[arg(long, env = "BUSINESS_REPORT")]
    pub business_report: Option<PathBuf>,

    /// basic, enterprise or ai
    #[arg(long, env = "PPC_VARIANT", default_value = "enterprise")]
    pub variant: Variant,

    /// balanced, growth or strict-profit
    #[arg(long, env = "PPC_STRATEGY", default_value = "balanced")]
    pub strategy: Strategy,

    /// Target ACOS in percent (10-60)
    #[arg(long, env = "TARGET_ACOS", default_value_t = DEFAULT_TARGET_ACOS_PCT)]
    pub target_acos: f64,

    /// Spend above which a term with no sales is negated (default depends on variant)
    #[arg(long, env = "WASTE_THRESHOLD")]
    pub waste_threshold: Option<f64>,

    /// Base campaign name used in the generated campaign templates
    #[arg(long, env = "BASE_CAMPAIGN_NAME", default_value = DEFAULT_BASE_NAME)]
    pub base_name: String,

    /// Where to write the bulk upload CSV
    #[arg(long, env = "BULK_OUTPUT", default_value = DEFAULT_BULK_OUTPUT)]
    pub bulk_out: PathBuf,

    /// Where to write the JSON analytics report (optional)
    #[arg(long, env = "REPORT_OUTPUT")]
    pub report_out: Option<PathBuf>,
}
