mod bulk;
mod cli;
mod config;
mod enrich;
mod error;
mod ingest;
mod metrics;
mod pipeline;
mod report;
mod rules;
mod staging;
mod summary;
mod types;

use std::path::Path;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::ingest::read_table_file;
use crate::pipeline::{Inputs, NamedTable};
use crate::report::{render_report, Report};
use crate::types::ActionLabel;

fn main() {
    let cfg = match Config::from_cli(Cli::parse()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    let code = exit_code(run(cfg));
    if code != 0 {
        std::process::exit(code);
    }
}

/// Log how a run ended and map it to the process exit status. A missing
/// search term report is a prompt, not a failure.
fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(AppError::MissingInput(hint)) => {
            warn!("{hint}");
            0
        }
        Err(e) => {
            error!("Fatal error: {e}");
            1
        }
    }
}

fn load(path: &Path) -> Result<NamedTable> {
    let table = read_table_file(path)?;
    Ok(NamedTable::new(path.display().to_string(), table))
}

fn run(cfg: Config) -> Result<()> {
    let settings = &cfg.settings;
    let search_terms = cfg.search_terms.as_deref().ok_or_else(|| {
        AppError::MissingInput(
            "Upload a search term report to begin: pass --search-terms <file> or set SEARCH_TERM_REPORT".to_string(),
        )
    })?;

    info!(
        variant = %settings.variant,
        strategy = %settings.strategy,
        target_acos = settings.target_acos,
        waste_threshold = settings.waste_threshold,
        "Starting analysis of {}",
        search_terms.display(),
    );

    let inputs = Inputs {
        search_terms: load(search_terms)?,
        sku_costs: cfg.sku_costs.as_deref().map(load).transpose()?,
        business_report: cfg.business_report.as_deref().map(load).transpose()?,
    };

    let output = pipeline::run(&inputs, settings)?;
    let report = Report::new(&output, settings);

    // --- Classification summary ---
    let totals = &output.totals;
    let counts: Vec<String> = ActionLabel::ALL
        .iter()
        .map(|l| l.to_string())
        .filter_map(|l| {
            let n = totals.count(&l);
            (n > 0).then(|| format!("{l}={n}"))
        })
        .collect();
    info!(
        rows = totals.rows,
        total_spend = totals.total_spend,
        total_sales = totals.total_sales,
        roas = totals.roas,
        "[CLASSIFY] {}",
        counts.join(" "),
    );
    if let Some(profit) = totals.total_profit {
        info!("[CLASSIFY] total profit {profit:.2}");
    }
    if let Some(tacos) = totals.tacos {
        info!("[CLASSIFY] TACOS {:.2}%", tacos * 100.0);
    }
    info!(
        waste_pool = output.pools.waste_pool,
        scale_pool = output.pools.scale_pool,
        "[CLASSIFY] budget pools: {:.2} on negated terms, {:.2} on scaled terms",
        output.pools.waste_pool,
        output.pools.scale_pool,
    );

    // --- Outputs: render and stage everything before any destination changes ---
    let bulk_bytes = bulk::render_bulk_csv(&output.bulk)?;
    let report_bytes = match &cfg.report_out {
        Some(_) => Some(render_report(&report)?),
        None => None,
    };

    let mut staged = vec![staging::stage(&cfg.bulk_out, &bulk_bytes)?];
    if let (Some(path), Some(bytes)) = (&cfg.report_out, &report_bytes) {
        staged.push(staging::stage(path, bytes)?);
    }
    staging::commit(staged)?;

    info!(
        campaigns = report.bulk.campaigns,
        ad_groups = report.bulk.ad_groups,
        keywords = report.bulk.keywords,
        negative_keywords = report.bulk.negative_keywords,
        "[BULK] wrote {} records to {}",
        output.bulk.len(),
        cfg.bulk_out.display(),
    );
    if let Some(path) = &cfg.report_out {
        info!("[REPORT] wrote {}", path.display());
    }

    Ok(())
}
