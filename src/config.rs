//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::tco::Catalog;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: String,
    /// JSON catalog replacing the built-in one
    pub catalog_path: Option<PathBuf>,
    pub cache_max_entries: u64,
    pub cache_ttl: Duration,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cache_max_entries = match get("TCO_CACHE_MAX_ENTRIES") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("TCO_CACHE_MAX_ENTRIES must be an integer, got {v:?}"))?,
            None => DEFAULT_CACHE_MAX_ENTRIES,
        };
        let cache_ttl_secs = match get("TCO_CACHE_TTL_SECS") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("TCO_CACHE_TTL_SECS must be an integer, got {v:?}"))?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            catalog_path: get("TCO_CATALOG_PATH").map(PathBuf::from),
            cache_max_entries,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }

    /// Load the catalog file if one is configured, else the built-in catalog.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let Some(path) = &self.catalog_path else {
            tracing::info!("Using built-in catalog");
            return Ok(Catalog::default());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = Catalog::from_json(&json)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        if catalog.tanks.is_empty() {
            anyhow::bail!("catalog {} defines no tank sizes", path.display());
        }

        tracing::info!(
            path = %path.display(),
            tanks = catalog.tanks.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }
}
