pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

pub use register::register_builtin_plugins;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错或数据无法解析
    ExistsButNoValue,
}

/// 以字符串为载体的对象缓存
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::debug!("Failed to deserialize cached value '{}': {}", key, e);
                    CacheResult::ExistsButNoValue
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    /// 序列化并写入
    pub async fn insert<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => tracing::debug!("Failed to serialize value for cache key '{}': {}", key, e),
        }
    }
}

/// 为缓存后端生成注册函数
///
/// 后端类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub(crate) fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|c| Box::new(c) as Box<dyn $crate::cache::ObjectCache>)
                            .map_err($crate::errors::PocketBuddyError::cache_connection)
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_typed_roundtrip_and_remove() {
        let cache: Arc<dyn ObjectCache> =
            Arc::new(MokaCacheWrapper::with_capacity(100, 60));

        cache.insert("k".to_string(), &vec![1, 2, 3], 0).await;
        assert_eq!(cache.get::<Vec<i32>>("k").await, CacheResult::Found(vec![1, 2, 3]));

        cache.remove("k").await;
        assert_eq!(cache.get::<Vec<i32>>("k").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_reported() {
        let cache: Arc<dyn ObjectCache> =
            Arc::new(MokaCacheWrapper::with_capacity(100, 60));
        cache.insert_raw("k".to_string(), "not json".to_string(), 0).await;
        assert_eq!(cache.get::<i32>("k").await, CacheResult::ExistsButNoValue);
    }
}
