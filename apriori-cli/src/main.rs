use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::Path;

// Import from apriori-core
use apriori_core::{MiningConfig, MiningProcessor, OutputFormat, ResultWriter};

// Import CLI utilities
use apriori_cli::{dump_stages_and_output, CacheLocator};

#[derive(Parser)]
#[command(name = "apriori-rules")]
#[command(about = "Mine frequent itemsets and association rules from transaction files")]
struct Args {
    /// Minimum support as a percentage (0-100)
    #[arg(required_unless_present = "show_configs", allow_negative_numbers = true)]
    min_support: Option<f64>,

    /// Input file: one transaction per line, whitespace-separated integer items
    #[arg(required_unless_present = "show_configs")]
    input: Option<String>,

    /// Output file for the association rules
    #[arg(required_unless_present = "show_configs")]
    output: Option<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Output format: tsv or json (overrides config)
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Show available config options and exit
    #[arg(long)]
    show_configs: bool,

    /// Enable detailed profiling of all pipeline steps
    #[arg(long)]
    profile: bool,

    /// Skip cache and force fresh mining
    #[arg(long)]
    skip_cache: bool,

    /// Directory for cached reports (default: platform cache dir)
    #[arg(long)]
    cache_dir: Option<String>,

    /// Dump all intermediate pipeline stage outputs to a directory
    #[arg(long)]
    dump_stages: bool,

    /// Directory for stage dump output
    #[arg(long, default_value = "stages")]
    stages_dir: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🦀 Apriori Rule Miner");

    if args.show_configs {
        show_help();
        return Ok(());
    }

    let (Some(min_support), Some(input), Some(output)) =
        (args.min_support, args.input.as_deref(), args.output.as_deref())
    else {
        return Err(anyhow!("MIN_SUPPORT, INPUT and OUTPUT are required"));
    };

    if !Path::new(input).exists() {
        eprintln!("❌ Input file not found at: {}", input);
        std::process::exit(1);
    }

    // Load config, then apply CLI overrides
    let mut config = MiningConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }

    config.min_support_percent = min_support;
    if let Some(format) = args.format {
        config.output_format = format;
    }
    if let Some(dir) = &args.cache_dir {
        config.cache.dir = Some(dir.clone());
    }

    if let Some(warning) = config.support_warning() {
        println!("⚠️  {}", warning);
    }

    let processor = create_processor(&config);

    println!(
        "📄 Processing: {} (min support {}%)",
        input, config.min_support_percent
    );

    if args.dump_stages {
        println!("\n🔬 Pipeline stage dump mode");
        match processor.process_file_capture_stages(input, &config) {
            Ok(stages) => {
                dump_stages_and_output(
                    &stages,
                    input,
                    Path::new(&args.stages_dir),
                    output,
                    config.output_format,
                )?;
                println!("\n✅ All stages dumped to: {}", args.stages_dir);
                println!(
                    "💾 {} results saved to: {}",
                    config.output_format.to_string().to_uppercase(),
                    output
                );
                return Ok(());
            }
            Err(e) => {
                eprintln!("❌ Stage dump failed: {e:#}");
                std::process::exit(1);
            }
        }
    }

    match processor.process_file_with_config_and_profiling(
        input,
        &config,
        args.profile,
        args.skip_cache,
    ) {
        Ok(report) => {
            println!("✅ Successfully mined transactions");
            println!("📊 Results:");
            println!("   - Transactions: {}", report.summary.transaction_count);
            println!("   - Frequent itemsets: {}", report.summary.frequent_itemset_count);
            println!("   - Rules: {}", report.summary.rule_count);

            ResultWriter::new().save_with_format(&report, output, config.output_format)?;
            println!(
                "💾 {} results saved to: {}",
                config.output_format.to_string().to_uppercase(),
                output
            );
        }
        Err(e) => {
            eprintln!("❌ Processing failed: {e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Build the processor, falling back to no caching when the cache directory
/// cannot be resolved or created
fn create_processor(config: &MiningConfig) -> MiningProcessor {
    if !config.cache.enabled {
        println!("🚫 Result cache disabled by config");
        return MiningProcessor::new_without_cache();
    }

    let processor = CacheLocator::with_override(config.cache.dir.as_deref()).and_then(|locator| {
        println!("🗂️  Using cache: {}", locator.path().display());
        MiningProcessor::new_cli(locator.path())
    });

    match processor {
        Ok(processor) => processor,
        Err(e) => {
            println!("⚠️  Cache unavailable ({e}), continuing without it");
            MiningProcessor::new_without_cache()
        }
    }
}

fn show_help() {
    println!("\n📋 Available Configuration Options:");
    println!("  <MIN_SUPPORT> <INPUT> <OUTPUT>  Support percentage, transaction file, rule file");
    println!("  --config <path>         Load custom config file");
    println!("  --format <fmt>          Output format: tsv or json");
    println!("  --profile               Time every pipeline step");
    println!("  --skip-cache            Mine from scratch and leave the cache untouched");
    println!("  --cache-dir <path>      Cache directory (default: platform cache dir)");
    println!("  --dump-stages           Write intermediate stage outputs");

    println!("\n📄 Output Formats:");
    println!("  tsv   - One rule per line: {{A}}<TAB>{{B}}<TAB>support<TAB>confidence (default)");
    println!("  json  - Full report with frequent itemsets, rules and level summary");

    println!("\n📁 Config file keys (YAML):");
    println!("  min_support_percent: 50.0");
    println!("  output_format: tsv");
    println!("  parallel_scan: {{ enabled: true, min_transactions: 4096 }}");
    println!("  cache: {{ enabled: true, dir: null }}");

    println!("\n📝 Usage Examples:");
    println!("  apriori-rules 5 transactions.txt rules.txt");
    println!("  apriori-rules 5 transactions.txt report.json --format json");
    println!("  apriori-rules 5 transactions.txt rules.txt -c mining.yaml --profile");
}
