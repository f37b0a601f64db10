use crate::config::OutputFormat;
use crate::types::{AssociationRule, MiningReport};
use anyhow::{Context, Result};
use std::fmt::Write as _;

/// Renders rules and reports into their on-disk representations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultWriter;

impl ResultWriter {
    pub fn new() -> Self {
        Self
    }

    /// One rule per line: `{a,..}\t{b,..}\tsupport\tconfidence`.
    pub fn format_rules_tsv(&self, rules: &[AssociationRule]) -> String {
        let mut out = String::new();
        for rule in rules {
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "{}\t{}\t{:.2}\t{:.2}",
                rule.antecedent.to_set_notation(),
                rule.consequent.to_set_notation(),
                rule.support,
                rule.confidence
            );
        }
        out
    }

    pub fn render(&self, report: &MiningReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Tsv => Ok(self.format_rules_tsv(&report.rules)),
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize mining report")
            }
        }
    }

    /// Render fully, then write once, so a failed render never leaves a
    /// truncated file behind.
    pub fn save_with_format(
        &self,
        report: &MiningReport,
        path: &str,
        format: OutputFormat,
    ) -> Result<()> {
        let rendered = self.render(report, format)?;
        std::fs::write(path, rendered).with_context(|| format!("Failed to write output to {path}"))?;
        Ok(())
    }
}
