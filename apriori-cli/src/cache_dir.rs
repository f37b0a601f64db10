//! Cache directory resolution for the CLI
//!
//! Reports are cached per user so repeated runs over the same input and
//! support threshold skip mining entirely.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Directory name under the platform cache root
const APP_DIR: &str = "apriori-rules";

/// Resolves where mining reports are cached
pub struct CacheLocator {
    cache_dir: PathBuf,
}

impl CacheLocator {
    /// Use the platform cache directory (e.g., ~/.cache/apriori-rules)
    pub fn new() -> Result<Self> {
        Ok(Self {
            cache_dir: Self::default_cache_dir()?,
        })
    }

    /// Explicit directory wins over the platform default
    pub fn with_override(dir: Option<&str>) -> Result<Self> {
        match dir {
            Some(dir) if !dir.is_empty() => Ok(Self {
                cache_dir: PathBuf::from(dir),
            }),
            _ => Self::new(),
        }
    }

    fn default_cache_dir() -> Result<PathBuf> {
        if let Some(base) = dirs::cache_dir() {
            return Ok(base.join(APP_DIR));
        }

        // No XDG/platform cache dir; fall back to ~/.cache
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home.join(".cache").join(APP_DIR))
    }

    pub fn path(&self) -> &Path {
        &self.cache_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used_verbatim() {
        let locator = CacheLocator::with_override(Some("/tmp/apriori-cache")).unwrap();
        assert_eq!(locator.path(), Path::new("/tmp/apriori-cache"));
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        if let Ok(locator) = CacheLocator::with_override(None) {
            assert!(locator.path().ends_with(APP_DIR));
        }
    }
}
