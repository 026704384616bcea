//! In-memory result cache keyed by configuration hash.
//!
//! Results are pure functions of the normalized configuration, so a hash
//! hit can be served without recomputation. Entries expire after the
//! configured TTL so catalog reloads take effect eventually.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::tco::CalculationResult;

#[derive(Clone)]
pub struct AppCache {
    results: Cache<String, Arc<CalculationResult>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl AppCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        Self {
            results: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn get(&self, input_hash: &str) -> Option<Arc<CalculationResult>> {
        let result = self.results.get(input_hash).await;
        let counter = if result.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        result
    }

    pub async fn insert(&self, input_hash: String, result: Arc<CalculationResult>) {
        self.results.insert(input_hash, result).await;
    }

    /// Cache statistics for the health endpoint.
    pub fn stats(&self) -> serde_json::Value {
        serde_json::json!({
            "results": {
                "entries": self.results.entry_count(),
                "hits": self.hits.load(Ordering::Relaxed),
                "misses": self.misses.load(Ordering::Relaxed),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tco::{calculate, Catalog, RawConfiguration};

    fn result() -> Arc<CalculationResult> {
        let raw: RawConfiguration = serde_json::from_str(
            r#"{"airCooling": {"rackCount": 10, "powerPerRackKw": 8}, "immersionCooling": {"targetPowerKw": 80}}"#,
        )
        .unwrap();
        Arc::new(calculate(&raw, &Catalog::default()).unwrap())
    }

    #[tokio::test]
    async fn test_hit_and_miss_counters() {
        let cache = AppCache::new(10, Duration::from_secs(60));

        assert!(cache.get("sha256:abc").await.is_none());
        cache.insert("sha256:abc".to_string(), result()).await;
        assert!(cache.get("sha256:abc").await.is_some());

        let stats = cache.stats();
        assert_eq!(stats["results"]["hits"], 1);
        assert_eq!(stats["results"]["misses"], 1);
    }
}
