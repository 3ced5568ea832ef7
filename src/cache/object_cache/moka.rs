use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::CacheConfig;

/// 缓存值及其单独的过期时间
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Option<Duration>,
}

struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }
}

pub struct MokaObjectCache {
    inner: Cache<String, Entry>,
}

impl MokaObjectCache {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.default_ttl))
            .expire_after(EntryExpiry)
            .build();

        debug!(
            "MokaObjectCache initialized with max capacity: {}, ttl: {}s",
            config.max_capacity, config.default_ttl
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => {
                debug!("Cache hit: {}", key);
                CacheResult::Found(entry.value)
            }
            None => {
                debug!("Cache miss: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = (ttl != 0).then(|| Duration::from_secs(ttl));
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> MokaObjectCache {
        MokaObjectCache::new(&CacheConfig {
            default_ttl: 60,
            max_capacity: 100,
        })
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = cache();
        assert_eq!(cache.get_raw("user:a").await, CacheResult::NotFound);

        cache
            .insert_raw("user:a".to_string(), "{}".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_raw("user:a").await,
            CacheResult::Found("{}".to_string())
        );

        cache.remove("user:a").await;
        assert_eq!(cache.get_raw("user:a").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires() {
        let cache = cache();
        cache
            .insert_raw("short".to_string(), "x".to_string(), 1)
            .await;
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
    }
}
