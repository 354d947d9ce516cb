use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::rules::BidModel;
use crate::types::{ActionLabel, Strategy, Variant};

/// Target ACOS used when none is configured (percent).
pub const DEFAULT_TARGET_ACOS_PCT: f64 = 35.0;

/// Allowed target ACOS range (percent, inclusive).
pub const TARGET_ACOS_MIN_PCT: f64 = 10.0;
pub const TARGET_ACOS_MAX_PCT: f64 = 60.0;

pub const DEFAULT_BASE_NAME: &str = "Product";

pub const DEFAULT_BULK_OUTPUT: &str = "enterprise_bulk_upload.csv";

/// Daily budget written on every generated Campaign record.
pub const CAMPAIGN_DAILY_BUDGET: f64 = 500.0;

/// Ad group created under every generated campaign.
pub const AD_GROUP_NAME: &str = "Main";

pub const RECORD_STATE_ENABLED: &str = "enabled";

/// Clicks at which a term reaches full confidence (100).
pub const CONFIDENCE_FULL_CLICKS: f64 = 50.0;

/// Substring that identifies the sales column in a search term report.
pub const SALES_COLUMN_NEEDLE: &str = "total sales";

/// Exact revenue column name in a business report.
pub const BUSINESS_REVENUE_COLUMN: &str = "total sales";

/// Hard waste spend thresholds: spend above this with zero sales is negated.
pub mod waste_thresholds {
    pub const BASIC: f64 = 200.0;
    pub const ENTERPRISE: f64 = 300.0;
    pub const AI: f64 = 300.0;
}

// ---------------------------------------------------------------------------
// Variant profiles
// ---------------------------------------------------------------------------

/// Label vocabulary for the three non-terminal outcomes of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    pub scale: ActionLabel,
    pub harvest: ActionLabel,
    pub watch: ActionLabel,
}

impl LabelSet {
    pub const STANDARD: LabelSet = LabelSet {
        scale: ActionLabel::Scale,
        harvest: ActionLabel::Harvest,
        watch: ActionLabel::Watch,
    };

    pub const POTENTIAL: LabelSet = LabelSet {
        scale: ActionLabel::HighPotential,
        harvest: ActionLabel::LowPotential,
        watch: ActionLabel::Neutral,
    };
}

/// Everything that differs between variants, in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantProfile {
    pub default_waste_threshold: f64,
    pub labels: LabelSet,
    /// ACOS reported for a row with no sales.
    pub acos_without_sales: f64,
    /// Require spend, sales, clicks and impressions columns.
    pub strict_columns: bool,
    /// Join the SKU cost file when one is supplied.
    pub profit_mode: bool,
    /// Evaluate the Loss rule ahead of the hard waste rule.
    pub loss_before_negative: bool,
    pub bid_model: BidModel,
    pub clusters: bool,
    pub confidence: bool,
}

impl Variant {
    pub fn profile(self) -> VariantProfile {
        match self {
            Variant::Basic => VariantProfile {
                default_waste_threshold: waste_thresholds::BASIC,
                labels: LabelSet::POTENTIAL,
                acos_without_sales: 1.0,
                strict_columns: false,
                profit_mode: false,
                loss_before_negative: false,
                bid_model: BidModel::Flat,
                clusters: false,
                confidence: false,
            },
            Variant::Enterprise => VariantProfile {
                default_waste_threshold: waste_thresholds::ENTERPRISE,
                labels: LabelSet::STANDARD,
                acos_without_sales: 0.0,
                strict_columns: false,
                profit_mode: true,
                loss_before_negative: false,
                bid_model: BidModel::StrategyUplift,
                clusters: false,
                confidence: false,
            },
            Variant::Ai => VariantProfile {
                default_waste_threshold: waste_thresholds::AI,
                labels: LabelSet::STANDARD,
                acos_without_sales: 0.0,
                strict_columns: true,
                profit_mode: true,
                loss_before_negative: true,
                bid_model: BidModel::ConfidenceWeighted,
                clusters: true,
                confidence: true,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Settings: the pure parameters every stage takes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub variant: Variant,
    pub strategy: Strategy,
    /// Fraction, e.g. 0.35 for 35%.
    pub target_acos: f64,
    pub waste_threshold: f64,
    pub base_name: String,
}

impl Settings {
    /// Variant defaults with balanced strategy and the default target ACOS.
    #[cfg(test)]
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            strategy: Strategy::Balanced,
            target_acos: DEFAULT_TARGET_ACOS_PCT / 100.0,
            waste_threshold: variant.profile().default_waste_threshold,
            base_name: DEFAULT_BASE_NAME.to_string(),
        }
    }

    pub fn profile(&self) -> VariantProfile {
        self.variant.profile()
    }

    /// ROAS at which spend pays for itself under the target ACOS.
    pub fn default_breakeven_roas(&self) -> f64 {
        1.0 / self.target_acos
    }
}

// ---------------------------------------------------------------------------
// Config: settings plus the files to read and write
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub log_level: String,
    pub search_terms: Option<PathBuf>,
    pub sku_costs: Option<PathBuf>,
    pub business_report: Option<PathBuf>,
    pub bulk_out: PathBuf,
    pub report_out: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if !(TARGET_ACOS_MIN_PCT..=TARGET_ACOS_MAX_PCT).contains(&cli.target_acos) {
            return Err(AppError::Config(format!(
                "TARGET_ACOS must be between {TARGET_ACOS_MIN_PCT:.0} and {TARGET_ACOS_MAX_PCT:.0} percent, got {}",
                cli.target_acos
            )));
        }

        let profile = cli.variant.profile();
        let waste_threshold = cli
            .waste_threshold
            .unwrap_or(profile.default_waste_threshold);
        if !waste_threshold.is_finite() || waste_threshold < 0.0 {
            return Err(AppError::Config(
                "WASTE_THRESHOLD must be a non-negative amount".to_string(),
            ));
        }

        let base_name = cli.base_name.trim().to_string();
        if base_name.is_empty() {
            return Err(AppError::Config(
                "BASE_CAMPAIGN_NAME must not be empty".to_string(),
            ));
        }

        Ok(Self {
            settings: Settings {
                variant: cli.variant,
                strategy: cli.strategy,
                target_acos: cli.target_acos / 100.0,
                waste_threshold,
                base_name,
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            search_terms: cli.search_terms,
            sku_costs: cli.sku_costs,
            business_report: cli.business_report,
            bulk_out: cli.bulk_out,
            report_out: cli.report_out,
        })
    }
}
