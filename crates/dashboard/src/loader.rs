use async_trait::async_trait;
use chrono::{DateTime, Utc};
use halving_core::cache::port::{Cache, CacheExt};
use halving_core::common::time::TimeProvider;
use halving_core::market::entity::PriceSeries;
use halving_core::market::error::MarketError;
use halving_core::market::port::{PriceHistoryProvider, PriceLoader};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// # Summary
/// 缓存条目：加载成功的序列及其对应的数据源指纹。
#[derive(Debug, Serialize, Deserialize)]
struct CachedSeries {
    // 数据源指纹 (文件修改时间)
    fingerprint: Option<DateTime<Utc>>,
    series: PriceSeries,
}

/// # Summary
/// 带记忆化与降级策略的价格序列加载器 (DataLoader)。
///
/// # Invariants
/// - `load` 永不失败：数据源缺失、不可读、格式错误或为空时返回单点降级序列。
/// - 只缓存成功加载的序列；降级序列从不写入缓存。
/// - 缓存命中要求指纹存在且与条目记录一致，否则重新读取。
pub struct CachedPriceLoader {
    // 原始数据源
    provider: Arc<dyn PriceHistoryProvider>,
    // 记忆化存储
    cache: Arc<dyn Cache>,
    // 降级序列使用的时钟
    clock: Arc<dyn TimeProvider>,
}

impl CachedPriceLoader {
    /// # Summary
    /// 创建加载器实例。
    ///
    /// # Arguments
    /// * `provider` - 价格历史数据源。
    /// * `cache` - 记忆化存储的具体实现。
    /// * `clock` - 时间供给器。
    pub fn new(
        provider: Arc<dyn PriceHistoryProvider>,
        cache: Arc<dyn Cache>,
        clock: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            provider,
            cache,
            clock,
        }
    }

    /// # Summary
    /// 尝试从缓存或数据源得到序列，不做降级。
    ///
    /// # Logic
    /// 1. 读取数据源指纹，失败即视为数据不可用。
    /// 2. 指纹一致时直接返回缓存条目。
    /// 3. 否则读取并解析数据源，拒绝空序列。
    /// 4. 写回缓存，缓存故障只记录日志。
    async fn try_load(&self) -> Result<PriceSeries, MarketError> {
        let key = self.provider.source_key();
        let fingerprint = self.provider.fingerprint().await?;

        match self.cache.get::<CachedSeries>(key).await {
            Ok(Some(entry)) if fingerprint.is_some() && entry.fingerprint == fingerprint => {
                debug!(source = key, "price series served from cache");
                return Ok(entry.series);
            }
            Ok(_) => {}
            Err(e) => warn!(source = key, "discarding unreadable cache entry: {}", e),
        }

        let series = PriceSeries::new(self.provider.fetch_history().await?)?;
        info!(source = key, points = series.len(), "price series loaded");

        let entry = CachedSeries {
            fingerprint,
            series,
        };
        if let Err(e) = self.cache.set(key, &entry).await {
            warn!(source = key, "failed to memoize price series: {}", e);
        }
        Ok(entry.series)
    }
}

#[async_trait]
impl PriceLoader for CachedPriceLoader {
    async fn load(&self) -> PriceSeries {
        match self.try_load().await {
            Ok(series) => series,
            Err(e) => {
                warn!(
                    source = self.provider.source_key(),
                    "price data unavailable, using placeholder series: {}", e
                );
                PriceSeries::fallback(self.clock.now_local().date())
            }
        }
    }

    async fn invalidate(&self) {
        let key = self.provider.source_key();
        match self.cache.del(key).await {
            Ok(()) => info!(source = key, "price series cache invalidated"),
            Err(e) => warn!(source = key, "failed to invalidate cache: {}", e),
        }
    }
}
