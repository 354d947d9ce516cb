use tracing::{debug, info, warn};

use crate::bulk::build_bulk_records;
use crate::config::Settings;
use crate::enrich::{self, JoinStats};
use crate::error::Result;
use crate::ingest::columns::Field;
use crate::ingest::{self, IngestStats, Table};
use crate::rules::{classify, suggested_bid};
use crate::summary::{summarize_by_cluster, summarize_by_sku, BudgetPools, GroupSummary, HeadlineTotals};
use crate::types::{BulkRecord, BusinessRevenueSummary, ClassifiedTerm};

/// A parsed input table together with the name used in messages.
#[derive(Debug, Clone)]
pub struct NamedTable {
    pub name: String,
    pub table: Table,
}

impl NamedTable {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inputs {
    pub search_terms: NamedTable,
    pub sku_costs: Option<NamedTable>,
    pub business_report: Option<NamedTable>,
}

/// Everything one run derives. Nothing here outlives the invocation.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub terms: Vec<ClassifiedTerm>,
    pub ingest: IngestStats,
    pub join: Option<JoinStats>,
    pub profit_mode: bool,
    pub revenue: Option<BusinessRevenueSummary>,
    pub totals: HeadlineTotals,
    pub pools: BudgetPools,
    /// `None` when the report has no SKU column.
    pub sku_summary: Option<Vec<GroupSummary>>,
    /// Only produced by variants with clustering.
    pub cluster_summary: Option<Vec<GroupSummary>>,
    pub bulk: Vec<BulkRecord>,
}

/// Run the whole analysis over already-parsed tables. Either every stage
/// succeeds or the first error is returned and nothing is produced.
pub fn run(inputs: &Inputs, settings: &Settings) -> Result<PipelineOutput> {
    let profile = settings.profile();

    let (mut records, ingest_stats) = ingest::load_search_terms(
        &inputs.search_terms.table,
        settings,
        &inputs.search_terms.name,
    )?;
    info!(
        rows = ingest_stats.rows,
        coerced_cells = ingest_stats.coerced_cells,
        "[INGEST] {}: {} search terms loaded",
        inputs.search_terms.name,
        ingest_stats.rows,
    );

    let mut join = None;
    match &inputs.sku_costs {
        Some(costs) if profile.profit_mode => {
            let cost_table = ingest::load_costs(&costs.table, &costs.name)?;
            if cost_table.is_empty() {
                warn!("[ENRICH] {}: no cost rows, every term will miss the join", costs.name);
            }
            let stats = enrich::apply_costs(&mut records, &cost_table, settings.target_acos);
            info!(
                skus = cost_table.len(),
                matched = stats.matched,
                unmatched = stats.unmatched,
                "[ENRICH] profit mode on: {} of {} terms joined a cost record",
                stats.matched,
                records.len(),
            );
            join = Some(stats);
        }
        Some(costs) => {
            warn!(
                "[ENRICH] {}: the {} variant has no profit mode, cost file ignored",
                costs.name, settings.variant
            );
        }
        None => debug!("[ENRICH] no cost file, revenue mode"),
    }
    let profit_mode = join.is_some();

    let revenue = inputs
        .business_report
        .as_ref()
        .and_then(|b| ingest::summarize_revenue(&b.table, &b.name));

    let model = profile.bid_model;
    let terms: Vec<ClassifiedTerm> = records
        .into_iter()
        .map(|record| {
            let action = classify(&record, settings, profit_mode);
            let bid = suggested_bid(&record, action, model, settings.strategy);
            ClassifiedTerm { record, action, bid }
        })
        .collect();

    let mut totals = HeadlineTotals::from_terms(&terms, profit_mode);
    totals.tacos = revenue.as_ref().map(|r| enrich::tacos(totals.total_spend, r));

    let pools = BudgetPools::from_terms(&terms);
    let sku_summary = (!ingest_stats.missing_columns.contains(&Field::Sku.name()))
        .then(|| summarize_by_sku(&terms, profit_mode));
    let cluster_summary = profile
        .clusters
        .then(|| summarize_by_cluster(&terms, profit_mode));

    let bulk = build_bulk_records(&terms, &settings.base_name);

    Ok(PipelineOutput {
        terms,
        ingest: ingest_stats,
        join,
        profit_mode,
        revenue,
        totals,
        pools,
        sku_summary,
        cluster_summary,
        bulk,
    })
}
