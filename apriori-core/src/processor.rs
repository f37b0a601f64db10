use crate::cache::{ReportCacheKey, ReportCacheValue};
use crate::config::MiningConfig;
use crate::loaders::{TransactionLoader, WhitespaceLoader};
use crate::mining::{ItemsetMiner, RuleGenerator};
use crate::storage::{calculate_config_hash, calculate_input_hash, FileStorage, NoOpStorage, ResultStorage};
use crate::types::*;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};

/// Timing of one pipeline step.
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub elapsed: Duration,
}

/// Collects step timings and the per-level candidate counts of a mining run.
pub struct StepProfiler {
    enabled: bool,
    steps: Vec<StepTiming>,
    levels: Vec<LevelStats>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps: Vec::new(),
            levels: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        println!("⏱️  {}: {}ms", step_name, elapsed.as_millis());
        self.steps.push(StepTiming {
            name: step_name.to_string(),
            elapsed,
        });
        result
    }

    /// Keep the level trace so the summary can show where candidate work went
    pub fn record_levels(&mut self, levels: &[LevelStats]) {
        if self.enabled {
            self.levels = levels.to_vec();
        }
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn total(&self) -> Duration {
        self.steps.iter().map(|step| step.elapsed).sum()
    }

    /// Candidates counted over all levels; each costs one pass over the transactions
    pub fn candidates_counted(&self) -> usize {
        self.levels.iter().map(|level| level.candidates).sum()
    }

    pub fn print_summary(&self) {
        if !self.enabled || self.steps.is_empty() {
            return;
        }

        let total = self.total();
        println!("\n📊 Performance Summary:");
        for step in &self.steps {
            let share = if total.is_zero() {
                0.0
            } else {
                step.elapsed.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            println!("   {:.<35} {}ms ({:.1}%)", step.name, step.elapsed.as_millis(), share);
        }
        println!("   {:.<35} {}ms", "Total", total.as_millis());

        if self.levels.is_empty() {
            return;
        }
        println!("\n🪜 Levels ({} candidates counted):", self.candidates_counted());
        for level in &self.levels {
            println!(
                "   size {:<3} candidates {:<8} frequent {:<8} pruned {}",
                level.size, level.candidates, level.frequent, level.pruned
            );
        }
    }
}

pub struct MiningProcessor {
    loader: Box<dyn TransactionLoader>,
    storage: Box<dyn ResultStorage + Send + Sync>,
    rule_generator: RuleGenerator,
}

impl MiningProcessor {
    /// Create MiningProcessor with full dependency injection
    pub fn new_with_dependencies(
        loader: Box<dyn TransactionLoader>,
        storage: Box<dyn ResultStorage + Send + Sync>,
    ) -> Self {
        Self {
            loader,
            storage,
            rule_generator: RuleGenerator::new(),
        }
    }

    /// Convenience constructor for CLI usage: whitespace input, file cache
    pub fn new_cli(cache_dir: impl AsRef<Path>) -> Result<Self> {
        let storage = Box::new(FileStorage::new(cache_dir)?);
        Ok(Self::new_with_dependencies(Box::new(WhitespaceLoader::new()), storage))
    }

    /// Whitespace input with caching disabled
    pub fn new_without_cache() -> Self {
        Self::new_with_dependencies(Box::new(WhitespaceLoader::new()), Box::new(NoOpStorage::new()))
    }

    /// Mine an input file: Input + Config → Report, consulting the cache first
    pub fn process_file_with_config_and_profiling(
        &self,
        input_path: &str,
        config: &MiningConfig,
        enable_profiling: bool,
        skip_cache: bool,
    ) -> Result<MiningReport> {
        let mut profiler = StepProfiler::new(enable_profiling);
        let start_time = Instant::now();

        let content = profiler
            .time_step("1. Read input", || std::fs::read_to_string(input_path))
            .with_context(|| format!("Failed to read input file {input_path}"))?;

        let cache_key = profiler.time_step("2. Cache key generation", || {
            let input_hash = calculate_input_hash(content.as_bytes());
            let config_hash = calculate_config_hash(&config.result_affecting())?;
            Ok::<ReportCacheKey, anyhow::Error>(ReportCacheKey::new(input_hash, config_hash))
        })?;

        let cached = if skip_cache {
            println!("🚫 Skipping cache lookup (--skip-cache enabled)");
            None
        } else {
            profiler.time_step("3. Cache lookup", || self.storage.get_report(&cache_key))?
        };

        if let Some(cached) = cached {
            println!("🎯 Cache hit: Found report for input + config combination");
            profiler.print_summary();
            println!(
                "⏱️  Total processing time: {:.0}ms (cached)",
                start_time.elapsed().as_millis()
            );
            return Ok(cached.report);
        }

        println!("📄 Loading transactions with {} loader", self.loader.name());
        let transactions = profiler
            .time_step("4. Parse transactions", || self.loader.parse(&content))
            .with_context(|| format!("Failed to load transactions from {input_path}"))?;
        println!("📦 Loaded {} transactions", transactions.len());

        let report = self.mine_and_report(&transactions, config, &mut profiler);

        if !skip_cache {
            profiler.time_step("7. Cache storage", || {
                let processing_time = start_time.elapsed().as_millis() as u64;
                let cache_value = ReportCacheValue::new(report.clone(), processing_time);
                self.storage.store_report(&cache_key, &cache_value)
            })?;
        } else {
            println!("🚫 Skipping cache storage (--skip-cache enabled)");
        }

        profiler.print_summary();
        println!(
            "⏱️  Total processing time: {:.0}ms",
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Mine transactions that are already in memory. Never touches the cache.
    pub fn process_transactions(
        &self,
        transactions: &[Transaction],
        config: &MiningConfig,
    ) -> MiningReport {
        self.mine_and_report(transactions, config, &mut StepProfiler::new(false))
    }

    /// Run every stage on an input file and keep all intermediate outputs
    pub fn process_file_capture_stages(
        &self,
        input_path: &str,
        config: &MiningConfig,
    ) -> Result<PipelineStages> {
        let transactions = self
            .loader
            .load_file(Path::new(input_path))
            .with_context(|| format!("Failed to load transactions from {input_path}"))?;

        let min_support = config.min_support_fraction();
        let miner = ItemsetMiner::from_parallel_config(&config.parallel_scan);
        let trace = miner.mine_with_trace(&transactions, min_support);
        let rules = self.rule_generator.generate_rules(&trace.table);

        let frequent_itemsets = trace.table.to_frequent_itemsets();
        let levels = trace.levels.clone();
        let report = MiningReport::new(&transactions, min_support, trace, rules.clone());

        Ok(PipelineStages {
            transactions,
            frequent_itemsets,
            levels,
            rules,
            report,
        })
    }

    fn mine_and_report(
        &self,
        transactions: &[Transaction],
        config: &MiningConfig,
        profiler: &mut StepProfiler,
    ) -> MiningReport {
        let min_support = config.min_support_fraction();
        let miner = ItemsetMiner::from_parallel_config(&config.parallel_scan);

        let trace = profiler.time_step("5. Mine frequent itemsets", || {
            miner.mine_with_trace(transactions, min_support)
        });
        profiler.record_levels(&trace.levels);
        println!(
            "🔍 Found {} frequent itemsets over {} levels",
            trace.table.len(),
            trace.levels.len()
        );

        let rules = profiler.time_step("6. Generate rules", || {
            self.rule_generator.generate_rules(&trace.table)
        });
        println!("📋 Generated {} association rules", rules.len());

        MiningReport::new(transactions, min_support, trace, rules)
    }
}
