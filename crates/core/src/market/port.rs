use crate::market::entity::{PricePoint, PriceSeries};
use crate::market::error::MarketError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// # Summary
/// 原始价格历史数据源接口 (本地文件等)。
///
/// # Invariants
/// - 只读：实现者不得修改底层资源。
/// - 返回的价格点保持资源中的原始顺序。
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// # Summary
    /// 数据源的稳定标识，用作缓存键 (例如文件路径)。
    fn source_key(&self) -> &str;

    /// # Summary
    /// 获取资源的版本指纹 (例如文件修改时间)。
    ///
    /// # Logic
    /// 1. 读取资源元数据。
    /// 2. 无法提供指纹时返回 `None`，调用方应视为"总是过期"。
    ///
    /// # Returns
    /// 成功返回指纹，资源缺失等情况返回 `MarketError`。
    async fn fingerprint(&self) -> Result<Option<DateTime<Utc>>, MarketError>;

    /// # Summary
    /// 读取并解析完整价格历史。
    ///
    /// # Logic
    /// 1. 读取资源内容。
    /// 2. 解析为价格点列表，日期字段转为日历日期。
    ///
    /// # Returns
    /// 成功返回价格点列表 (可能为空，由调用方判定)。
    async fn fetch_history(&self) -> Result<Vec<PricePoint>, MarketError>;
}

/// # Summary
/// 价格序列加载器契约 (DataLoader)。
///
/// # Invariants
/// - `load` 永不失败：任何故障都被吸收为单点降级序列。
/// - 可以在多次调用间记忆化结果。
#[async_trait]
pub trait PriceLoader: Send + Sync {
    /// # Summary
    /// 加载价格序列。
    ///
    /// # Returns
    /// 非空的价格序列；故障时为 `[{date: today, price: 0}]`。
    async fn load(&self) -> PriceSeries;

    /// # Summary
    /// 手动丢弃已记忆化的结果，下一次 `load` 将重新读取资源。
    async fn invalidate(&self);
}
