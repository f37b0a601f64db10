// Apriori Core Library
//
// Mines frequent itemsets from integer-coded transactions and derives
// association rules from them. Pipeline: load -> mine -> rules -> write.

pub mod types;
pub mod error;
pub mod loaders;
pub mod mining;
pub mod output;
pub mod processor;
pub mod cache;
pub mod config;
pub mod storage;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{AprioriError, AprioriResult};
pub use loaders::{TransactionLoader, WhitespaceLoader};
pub use mining::{ItemsetMiner, RuleGenerator, SupportCounter};
pub use output::ResultWriter;
pub use processor::{MiningProcessor, StepProfiler, StepTiming};
pub use config::{MiningConfig, OutputFormat};
