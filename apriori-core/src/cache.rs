use crate::types::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version constants for cache invalidation
pub mod versions {
    pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
    /// Bump when mining or rule semantics change
    pub const ALGORITHM_VERSION: &str = "1.0.0";
}

/// Cache key (Input + Config → Report)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReportCacheKey {
    pub input_hash: String,
    pub config_hash: String,
    pub tool_version: String,
    pub algorithm_version: String,
}

impl ReportCacheKey {
    pub fn new(input_hash: String, config_hash: String) -> Self {
        Self {
            input_hash,
            config_hash,
            tool_version: versions::TOOL_VERSION.to_string(),
            algorithm_version: versions::ALGORITHM_VERSION.to_string(),
        }
    }

    /// Compute cache key hash for storage
    pub fn to_cache_hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(&self.input_hash);
        hasher.update(&self.config_hash);
        hasher.update(&self.tool_version);
        hasher.update(&self.algorithm_version);
        format!("{:x}", hasher.finalize())
    }
}

/// Cached report with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCacheValue {
    pub report: MiningReport,
    pub created_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub cache_version: String,
}

impl ReportCacheValue {
    pub fn new(report: MiningReport, processing_time_ms: u64) -> Self {
        Self {
            report,
            created_at: Utc::now(),
            processing_time_ms,
            cache_version: versions::TOOL_VERSION.to_string(),
        }
    }
}
