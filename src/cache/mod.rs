//! 对象缓存层
//!
//! 中间件通过 `Arc<dyn ObjectCache>` 使用缓存，目前只有 Moka 内存实现。

pub mod object_cache;

use async_trait::async_trait;

pub use object_cache::moka::MokaObjectCache;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 为 0 时使用缓存的全局过期时间
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
