use crate::error::AprioriResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_min_support_percent() -> f64 {
    50.0
}

fn default_min_parallel_transactions() -> usize {
    4096 // Below this, rayon's split overhead outweighs the scan itself
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MiningConfig {
    /// Minimum support as a percentage (0-100)
    #[serde(default = "default_min_support_percent")]
    pub min_support_percent: f64,
    /// Output format for the rule file
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Transaction scan parallelism
    #[serde(default)]
    pub parallel_scan: ParallelScanConfig,
    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelScanConfig {
    /// Whether support counting may fan out over rayon's thread pool
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Minimum number of transactions before the parallel scan is used
    #[serde(default = "default_min_parallel_transactions")]
    pub min_transactions: usize,
}

impl Default for ParallelScanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_transactions: default_min_parallel_transactions(),
        }
    }
}

impl ParallelScanConfig {
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            min_transactions: default_min_parallel_transactions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cache directory; the CLI picks a platform default when unset
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rule per line, tab-separated
    #[default]
    Tsv,
    /// Full report with itemsets, rules and summary
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Tsv => f.write_str("tsv"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected tsv or json)")),
        }
    }
}

/// The subset of configuration that changes mining results.
/// Hashed for the result cache key.
#[derive(Debug, Clone, Serialize)]
pub struct ResultAffectingConfig {
    pub min_support_percent: f64,
}

impl MiningConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> AprioriResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MiningConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                eprintln!("⚠️  Failed to load config from {p} ({e}), using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Minimum support normalized to a fraction
    pub fn min_support_fraction(&self) -> f64 {
        self.min_support_percent / 100.0
    }

    /// Warning text when the support threshold is outside (0, 1].
    /// Such thresholds are still honoured; the output is just degenerate.
    pub fn support_warning(&self) -> Option<String> {
        let fraction = self.min_support_fraction();
        if fraction.is_nan() {
            Some("minimum support is not a number; no itemset will qualify".to_string())
        } else if fraction <= 0.0 {
            Some(format!(
                "minimum support {}% admits every itemset; expect a combinatorial explosion",
                self.min_support_percent
            ))
        } else if fraction > 1.0 {
            Some(format!(
                "minimum support {}% exceeds 100%; no itemset can qualify",
                self.min_support_percent
            ))
        } else {
            None
        }
    }

    pub fn result_affecting(&self) -> ResultAffectingConfig {
        ResultAffectingConfig {
            min_support_percent: self.min_support_percent,
        }
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support_percent: default_min_support_percent(),
            output_format: OutputFormat::default(),
            parallel_scan: ParallelScanConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}
