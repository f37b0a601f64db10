// All mining functionality is in apriori-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod cache_dir;
pub mod stage_dump;

// Re-export core types for convenience
pub use apriori_core::*;

// Re-export CLI utilities
pub use cache_dir::CacheLocator;
pub use stage_dump::dump_stages_and_output;
