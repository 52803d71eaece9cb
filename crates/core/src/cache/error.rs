use thiserror::Error;

/// # Summary
/// 记忆化缓存错误。
///
/// # Invariants
/// - 缓存故障只会导致重新读取数据源，不会影响加载结果。
#[derive(Error, Debug)]
pub enum CacheError {
    // 条目编码为 JSON 失败
    #[error("cache entry encode failed: {0}")]
    Serialize(String),
    // 条目与当前结构不兼容
    #[error("cache entry decode failed: {0}")]
    Deserialize(String),
}
