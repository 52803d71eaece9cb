use async_trait::async_trait;
use dashmap::DashMap;
use halving_core::cache::error::CacheError;
use halving_core::cache::port::Cache;

/// # Summary
/// 基于 DashMap 的进程内缓存，用于记忆化价格序列的加载结果。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 不提供自动过期或容量限制，失效由加载器按修改时间或手动触发。
pub struct MemCache {
    // 键为数据源标识，值为序列化后的条目
    storage: DashMap<String, Vec<u8>>,
}

impl MemCache {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// 当前缓存的条目数量
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for MemCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MemCache {
    async fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        tracing::trace!(key, bytes = value.len(), "cache set");
        self.storage.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.storage.get(key).map(|v| v.value().clone()))
    }

    /// 原子移除，无论键是否存在均返回 Ok
    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.storage.remove(key);
        Ok(())
    }
}
