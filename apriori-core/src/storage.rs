use crate::cache::{ReportCacheKey, ReportCacheValue};
use anyhow::{anyhow, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage abstraction for caching mining reports
pub trait ResultStorage {
    fn get_report(&self, cache_key: &ReportCacheKey) -> Result<Option<ReportCacheValue>>;
    fn store_report(&self, cache_key: &ReportCacheKey, cache_value: &ReportCacheValue) -> Result<()>;
}

/// File-based storage implementation using a local cache directory
pub struct FileStorage {
    cache_dir: PathBuf,
}

impl FileStorage {
    pub fn new(cache_dir: impl AsRef<Path>) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(cache_dir.join("reports"))?;
        Ok(Self { cache_dir })
    }

    fn report_path(&self, cache_key: &ReportCacheKey) -> PathBuf {
        self.cache_dir
            .join("reports")
            .join(format!("{}.json", cache_key.to_cache_hash()))
    }
}

impl ResultStorage for FileStorage {
    fn get_report(&self, cache_key: &ReportCacheKey) -> Result<Option<ReportCacheValue>> {
        let path = self.report_path(cache_key);
        if path.exists() {
            let json_str = fs::read_to_string(path)?;
            let cache_value: ReportCacheValue = serde_json::from_str(&json_str)
                .map_err(|e| anyhow!("Failed to deserialize cached report: {}", e))?;
            Ok(Some(cache_value))
        } else {
            Ok(None)
        }
    }

    fn store_report(&self, cache_key: &ReportCacheKey, cache_value: &ReportCacheValue) -> Result<()> {
        let path = self.report_path(cache_key);
        let json_str = serde_json::to_string(cache_value)
            .map_err(|e| anyhow!("Failed to serialize report for cache: {}", e))?;
        fs::write(path, json_str)?;
        Ok(())
    }
}

/// No-op storage implementation that disables all caching
pub struct NoOpStorage;

impl Default for NoOpStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NoOpStorage {
    pub fn new() -> Self {
        Self
    }
}

impl ResultStorage for NoOpStorage {
    fn get_report(&self, _cache_key: &ReportCacheKey) -> Result<Option<ReportCacheValue>> {
        Ok(None) // Always cache miss
    }

    fn store_report(&self, _cache_key: &ReportCacheKey, _cache_value: &ReportCacheValue) -> Result<()> {
        Ok(()) // No-op
    }
}

/// Hash of the full input file content
pub fn calculate_input_hash(input_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input_bytes.len().to_le_bytes());
    hasher.update(input_bytes);
    format!("{:x}", hasher.finalize())
}

/// Calculate hash for configuration data (for the cache key)
pub fn calculate_config_hash<T: serde::Serialize>(config: &T) -> Result<String> {
    let config_json = serde_json::to_string(config)
        .map_err(|e| anyhow!("Failed to serialize config for hashing: {}", e))?;

    let mut hasher = Sha256::new();
    hasher.update(config_json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MiningConfig;
    use crate::types::{MiningReport, MiningTrace, Transaction};

    #[test]
    fn test_input_hash_consistency() {
        let data = b"1 2 3\n2 3\n";
        assert_eq!(calculate_input_hash(data), calculate_input_hash(data));
    }

    #[test]
    fn test_input_hash_uniqueness() {
        assert_ne!(calculate_input_hash(b"1 2\n"), calculate_input_hash(b"1 3\n"));
    }

    #[test]
    fn test_config_hash_ignores_presentation_fields() {
        let mut a = MiningConfig::default();
        let mut b = MiningConfig::default();
        b.output_format = crate::config::OutputFormat::Json;
        b.parallel_scan.enabled = false;
        assert_eq!(
            calculate_config_hash(&a.result_affecting()).unwrap(),
            calculate_config_hash(&b.result_affecting()).unwrap()
        );

        a.min_support_percent = 10.0;
        assert_ne!(
            calculate_config_hash(&a.result_affecting()).unwrap(),
            calculate_config_hash(&b.result_affecting()).unwrap()
        );
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        let key = ReportCacheKey::new("abc".into(), "def".into());

        assert!(storage.get_report(&key).unwrap().is_none());

        let transactions = vec![Transaction::new([1, 2])];
        let report = MiningReport::new(&transactions, 0.5, MiningTrace::default(), Vec::new());
        storage
            .store_report(&key, &ReportCacheValue::new(report.clone(), 7))
            .unwrap();

        let cached = storage.get_report(&key).unwrap().unwrap();
        assert_eq!(cached.processing_time_ms, 7);
        assert_eq!(cached.report.run_id, report.run_id);
        assert_eq!(cached.report.summary, report.summary);
    }

    #[test]
    fn test_noop_storage_never_hits() {
        let storage = NoOpStorage::new();
        let key = ReportCacheKey::new("abc".into(), "def".into());
        let report = MiningReport::new(&[], 0.5, MiningTrace::default(), Vec::new());
        storage.store_report(&key, &ReportCacheValue::new(report, 1)).unwrap();
        assert!(storage.get_report(&key).unwrap().is_none());
    }
}
