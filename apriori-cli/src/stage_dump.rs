//! `--dump-stages` support: intermediate outputs plus the regular result file

use anyhow::{Context, Result};
use apriori_core::{OutputFormat, PipelineStages, ResultWriter};
use std::fs;
use std::path::Path;

/// Write every captured stage under `stages_dir`, then the result file at
/// `output` exactly as a normal run would.
pub fn dump_stages_and_output(
    stages: &PipelineStages,
    input: &str,
    stages_dir: &Path,
    output: &str,
    format: OutputFormat,
) -> Result<()> {
    save_stages(stages, input, stages_dir)?;
    ResultWriter::new().save_with_format(&stages.report, output, format)
}

pub fn save_stages(stages: &PipelineStages, input: &str, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create stage directory {}", output_dir.display()))?;

    // Stage 1: Transactions
    let tx_path = output_dir.join("stage1_transactions.json");
    fs::write(&tx_path, serde_json::to_string_pretty(&stages.transactions)?)?;
    println!("  💾 {} ({} transactions)", tx_path.display(), stages.transactions.len());

    // Stage 2: Frequent itemsets and level trace
    let fi_path = output_dir.join("stage2_frequent_itemsets.json");
    let fi_json = serde_json::json!({
        "levels": stages.levels,
        "frequent_itemsets": stages.frequent_itemsets,
    });
    fs::write(&fi_path, serde_json::to_string_pretty(&fi_json)?)?;
    println!("  💾 {} ({} itemsets)", fi_path.display(), stages.frequent_itemsets.len());

    // Stage 3: Rules
    let rules_path = output_dir.join("stage3_rules.tsv");
    fs::write(&rules_path, ResultWriter::new().format_rules_tsv(&stages.rules))?;
    println!("  💾 {} ({} rules)", rules_path.display(), stages.rules.len());

    // Summary file: quick reference for validation scripts
    let summary = serde_json::json!({
        "input": input,
        "captured_at": chrono::Utc::now().to_rfc3339(),
        "stage_counts": {
            "transactions": stages.transactions.len(),
            "levels": stages.levels.len(),
            "frequent_itemsets": stages.frequent_itemsets.len(),
            "rules": stages.rules.len(),
        }
    });
    let summary_path = output_dir.join("summary.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    println!("  💾 {}", summary_path.display());

    Ok(())
}
