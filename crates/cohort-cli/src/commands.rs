use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Table;
use tracing::{info, info_span};

use cohort_engine::ConsolidationResult;
use cohort_ingest::{discover_sources, read_source_csv};
use cohort_model::{CanonicalRecord, SourceKind};
use cohort_store::MemoryStore;

use crate::cli::RunArgs;
use crate::summary::apply_table_style;
use crate::types::{RunReport, RunResult};

pub fn run_sources() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Table", "File", "Columns"]);
    apply_table_style(&mut table);
    for kind in SourceKind::ALL {
        table.add_row(vec![
            kind.table_name().to_string(),
            format!("{}.csv", kind.table_name()),
            kind.expected_columns().join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_consolidation(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", data_dir = %args.data_dir.display());
    let _guard = span.enter();

    let sources = discover_sources(&args.data_dir).context("discover source files")?;
    let mut store = MemoryStore::new();
    for source in &sources {
        let frame = read_source_csv(&source.path)
            .with_context(|| format!("ingest {}", source.path.display()))?;
        store.put(source.kind.table_name(), frame)?;
    }

    let result = cohort_engine::consolidate(&mut store)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.data_dir.join("canonical_records.csv"));
    let written = if args.dry_run {
        info!("dry run, canonical table not written");
        None
    } else {
        write_canonical_csv(&output, &result.to_records()?)
            .with_context(|| format!("write {}", output.display()))?;
        info!(path = %output.display(), "canonical table written");
        Some(output)
    };

    if let Some(report_path) = &args.report {
        write_report(report_path, &result).with_context(|| format!("write {}", report_path.display()))?;
        info!(path = %report_path.display(), "run report written");
    }

    Ok(RunResult {
        persons: result.records.height(),
        output: written,
        report: args.report.clone(),
        attributes: result.attributes,
    })
}

fn write_canonical_csv(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_report(path: &Path, result: &ConsolidationResult) -> Result<()> {
    let report = RunReport {
        generated_at: Utc::now().to_rfc3339(),
        persons: result.records.height(),
        attributes: &result.attributes,
    };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, json)?;
    Ok(())
}
