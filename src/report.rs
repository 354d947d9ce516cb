use serde::Serialize;

use crate::bulk::count_records;
use crate::config::Settings;
use crate::enrich::JoinStats;
use crate::error::Result;
use crate::ingest::IngestStats;
use crate::pipeline::PipelineOutput;
use crate::summary::{BudgetPools, GroupSummary, HeadlineTotals};
use crate::types::{ActionLabel, BulkRecord, ClassifiedTerm, RecordType, Strategy, Variant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkCounts {
    pub campaigns: usize,
    pub ad_groups: usize,
    pub keywords: usize,
    pub negative_keywords: usize,
}

impl BulkCounts {
    pub fn from_records(records: &[BulkRecord]) -> Self {
        Self {
            campaigns: count_records(records, RecordType::Campaign),
            ad_groups: count_records(records, RecordType::AdGroup),
            keywords: count_records(records, RecordType::Keyword),
            negative_keywords: count_records(records, RecordType::NegativeKeyword),
        }
    }
}

/// One classified row as it appears in the report.
#[derive(Debug, Serialize)]
pub struct TermRow<'a> {
    pub search_term: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<&'a str>,
    pub spend: f64,
    pub sales: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub orders: f64,
    pub roas: f64,
    pub acos: f64,
    pub cpc: f64,
    pub ctr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_acos: Option<f64>,
    pub action: ActionLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
}

impl<'a> TermRow<'a> {
    fn new(term: &'a ClassifiedTerm, with_confidence: bool) -> Self {
        let r = &term.record;
        Self {
            search_term: &r.search_term,
            sku: r.sku.as_deref(),
            spend: r.spend,
            sales: r.sales,
            clicks: r.clicks,
            impressions: r.impressions,
            orders: r.orders,
            roas: r.roas,
            acos: r.acos,
            cpc: r.cpc,
            ctr: r.ctr,
            confidence: with_confidence.then_some(r.confidence),
            profit: r.profit,
            break_even_acos: r.break_even_acos,
            action: term.action,
            bid: term.bid,
        }
    }
}

/// JSON analytics report for one run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub variant: Variant,
    pub strategy: Strategy,
    pub target_acos: f64,
    pub breakeven_roas: f64,
    pub waste_threshold: f64,
    pub base_campaign_name: &'a str,
    pub profit_mode: bool,
    pub ingest: &'a IngestStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_join: Option<JoinStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    pub totals: &'a HeadlineTotals,
    pub budget: BudgetPools,
    pub bulk: BulkCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_summary: Option<&'a [GroupSummary]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_summary: Option<&'a [GroupSummary]>,
    pub terms: Vec<TermRow<'a>>,
}

impl<'a> Report<'a> {
    pub fn new(output: &'a PipelineOutput, settings: &'a Settings) -> Self {
        let with_confidence = settings.profile().confidence;
        Self {
            variant: settings.variant,
            strategy: settings.strategy,
            target_acos: settings.target_acos,
            breakeven_roas: settings.default_breakeven_roas(),
            waste_threshold: settings.waste_threshold,
            base_campaign_name: &settings.base_name,
            profit_mode: output.profit_mode,
            ingest: &output.ingest,
            cost_join: output.join,
            total_revenue: output.revenue.as_ref().map(|r| r.total_revenue),
            totals: &output.totals,
            budget: output.pools,
            bulk: BulkCounts::from_records(&output.bulk),
            sku_summary: output.sku_summary.as_deref(),
            cluster_summary: output.cluster_summary.as_deref(),
            terms: output
                .terms
                .iter()
                .map(|t| TermRow::new(t, with_confidence))
                .collect(),
        }
    }
}

/// Pretty JSON with a trailing newline.
pub fn render_report(report: &Report<'_>) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{read_table, TableFormat};
    use crate::pipeline::{self, Inputs, NamedTable};
    use serde_json::Value;

    const REPORT: &str = "\
customer search term,advertised sku,impressions,clicks,spend,7 day total sales
running shoes men,SKU-A,1000,50,100,400
free shoes,SKU-B,3000,70,350,0
shoe rack,,200,5,20,0
";

    fn run(settings: &Settings) -> PipelineOutput {
        let table = read_table(REPORT.as_bytes(), TableFormat::Csv).unwrap();
        let inputs = Inputs {
            search_terms: NamedTable::new("terms.csv", table),
            sku_costs: None,
            business_report: None,
        };
        pipeline::run(&inputs, settings).unwrap()
    }

    fn to_json(output: &PipelineOutput, settings: &Settings) -> Value {
        serde_json::to_value(Report::new(output, settings)).unwrap()
    }

    #[test]
    fn enterprise_report_shape() {
        let settings = Settings::for_variant(Variant::Enterprise);
        let output = run(&settings);
        let json = to_json(&output, &settings);

        assert_eq!(json["variant"], "enterprise");
        assert_eq!(json["strategy"], "balanced");
        assert_eq!(json["profit_mode"], false);
        assert_eq!(json["budget"]["waste_pool"], 350.0);
        assert_eq!(json["budget"]["scale_pool"], 100.0);
        assert_eq!(json["bulk"]["keywords"], 1);
        assert_eq!(json["bulk"]["negative_keywords"], 1);
        assert_eq!(json["bulk"]["campaigns"], 3);
        assert_eq!(json["totals"]["label_counts"]["Scale"], 1);
        assert_eq!(json["ingest"]["rows_without_sku"], 1);
        assert!(json.get("cluster_summary").is_none());
        assert!(json.get("total_revenue").is_none());

        let first = &json["terms"][0];
        assert_eq!(first["action"], "Scale");
        assert_eq!(first["bid"], 2.2);
        assert!(first.get("confidence").is_none());
        assert!(json["terms"][2].get("sku").is_none());

        let skus = json["sku_summary"].as_array().unwrap();
        assert_eq!(skus.len(), 2);
        assert_eq!(skus[0]["key"], "SKU-A");
    }

    #[test]
    fn ai_report_carries_confidence_and_clusters() {
        let settings = Settings::for_variant(Variant::Ai);
        let output = run(&settings);
        let json = to_json(&output, &settings);

        assert_eq!(json["terms"][0]["confidence"], 100.0);
        assert_eq!(json["terms"][1]["bid"], 4.0);
        let clusters = json["cluster_summary"].as_array().unwrap();
        assert_eq!(clusters[0]["key"], "running shoes");
    }

    #[test]
    fn basic_labels_serialize_with_spaces() {
        let settings = Settings::for_variant(Variant::Basic);
        let output = run(&settings);
        let json = to_json(&output, &settings);
        assert_eq!(json["terms"][0]["action"], "High Potential");
        assert_eq!(json["totals"]["label_counts"]["High Potential"], 1);
    }

    #[test]
    fn renders_pretty_json() {
        let settings = Settings::for_variant(Variant::Enterprise);
        let output = run(&settings);
        let bytes = render_report(&Report::new(&output, &settings)).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["totals"]["rows"], 3);
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"variant\": \"enterprise\""));
    }

    #[test]
    fn strict_profit_uses_flag_spelling() {
        let settings = Settings {
            strategy: Strategy::StrictProfit,
            ..Settings::for_variant(Variant::Enterprise)
        };
        let output = run(&settings);
        assert_eq!(to_json(&output, &settings)["strategy"], "strict-profit");
    }
}
