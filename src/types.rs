use serde::Serialize;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Run settings
// ---------------------------------------------------------------------------

/// Which flavour of the report to produce. Variants share the pipeline and
/// differ only in thresholds, labels and optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Basic,
    Enterprise,
    Ai,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Variant::Basic => "basic",
            Variant::Enterprise => "enterprise",
            Variant::Ai => "ai",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Variant::Basic),
            "enterprise" => Ok(Variant::Enterprise),
            "ai" => Ok(Variant::Ai),
            other => Err(format!(
                "unknown variant '{other}' (expected basic, enterprise or ai)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Balanced,
    Growth,
    StrictProfit,
}

impl Strategy {
    /// Multiplier applied to the breakeven ROAS before comparing.
    /// Below 1.0 makes Scale easier to reach, above 1.0 harder.
    pub fn threshold_multiplier(self) -> f64 {
        match self {
            Strategy::Growth => 0.8,
            Strategy::Balanced => 1.0,
            Strategy::StrictProfit => 1.2,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Strategy::Balanced => "Balanced",
            Strategy::Growth => "Growth",
            Strategy::StrictProfit => "Strict Profit",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match norm.as_str() {
            "balanced" => Ok(Strategy::Balanced),
            "growth" => Ok(Strategy::Growth),
            "strictprofit" | "strict" => Ok(Strategy::StrictProfit),
            _ => Err(format!(
                "unknown strategy '{s}' (expected balanced, growth or strict-profit)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Action labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionLabel {
    Scale,
    Harvest,
    Watch,
    Negative,
    Loss,
    #[serde(rename = "High Potential")]
    HighPotential,
    #[serde(rename = "Low Potential")]
    LowPotential,
    Neutral,
}

impl ActionLabel {
    pub const ALL: [ActionLabel; 8] = [
        ActionLabel::Scale,
        ActionLabel::Harvest,
        ActionLabel::Watch,
        ActionLabel::Negative,
        ActionLabel::Loss,
        ActionLabel::HighPotential,
        ActionLabel::LowPotential,
        ActionLabel::Neutral,
    ];

    /// Rows that earn a new exact keyword and count toward the scale pool.
    pub fn is_scale(self) -> bool {
        matches!(self, ActionLabel::Scale | ActionLabel::HighPotential)
    }

    /// Rows that earn a negative keyword and count toward the waste pool.
    pub fn is_negative(self) -> bool {
        self == ActionLabel::Negative
    }

    /// Rows that converted but fell short of the breakeven threshold.
    pub fn is_harvest(self) -> bool {
        matches!(self, ActionLabel::Harvest | ActionLabel::LowPotential)
    }
}

impl std::fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionLabel::Scale => "Scale",
            ActionLabel::Harvest => "Harvest",
            ActionLabel::Watch => "Watch",
            ActionLabel::Negative => "Negative",
            ActionLabel::Loss => "Loss",
            ActionLabel::HighPotential => "High Potential",
            ActionLabel::LowPotential => "Low Potential",
            ActionLabel::Neutral => "Neutral",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Input rows
// ---------------------------------------------------------------------------

/// One search term row after column resolution and metric derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTermRecord {
    pub search_term: String,
    pub sku: Option<String>,
    pub spend: f64,
    pub sales: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub orders: f64,
    pub roas: f64,
    pub acos: f64,
    pub cpc: f64,
    pub ctr: f64,
    pub confidence: f64,
    /// Set only in profit mode, and only when the SKU joined a cost record.
    pub profit: Option<f64>,
    pub break_even_acos: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostRecord {
    pub sku: String,
    pub product_cost: f64,
    pub amazon_fees: f64,
    pub shipping: f64,
    pub selling_price: f64,
}

impl CostRecord {
    pub fn total_cost(&self) -> f64 {
        self.product_cost + self.amazon_fees + self.shipping
    }

    pub fn profit_per_unit(&self) -> f64 {
        self.selling_price - self.total_cost()
    }

    /// Margin share of the selling price; falls back to `target_acos` when
    /// there is no usable price.
    pub fn break_even_acos(&self, target_acos: f64) -> f64 {
        if self.selling_price > 0.0 {
            self.profit_per_unit() / self.selling_price
        } else {
            target_acos
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusinessRevenueSummary {
    pub total_revenue: f64,
}

/// A search term with its action and, where one applies, a suggested bid.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTerm {
    pub record: SearchTermRecord,
    pub action: ActionLabel,
    pub bid: Option<f64>,
}

// ---------------------------------------------------------------------------
// Bulk upload records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Campaign,
    AdGroup,
    Keyword,
    NegativeKeyword,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecordType::Campaign => "Campaign",
            RecordType::AdGroup => "Ad Group",
            RecordType::Keyword => "Keyword",
            RecordType::NegativeKeyword => "Negative Keyword",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    Exact,
    NegativeExact,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact"),
            MatchType::NegativeExact => write!(f, "Negative Exact"),
        }
    }
}

/// Flat row of the bulk upload sheet. Which fields are set depends on
/// `record_type`; the rest serialize as empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRecord {
    pub record_type: RecordType,
    pub campaign: String,
    pub ad_group: Option<String>,
    pub keyword_text: Option<String>,
    pub match_type: Option<MatchType>,
    pub bid: Option<f64>,
    pub state: String,
    pub daily_budget: Option<f64>,
}
