use chrono::Datelike;
use halving_core::chart::entity::ChartSpec;
use halving_core::common::ScaleMode;
use halving_core::common::time::TimeProvider;
use halving_core::config::{DashboardConfig, ProjectionConfig};
use halving_core::market::port::PriceLoader;
use halving_core::metrics::entity::{Countdown, DerivedMetrics};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chart::build_chart;
use crate::format::{MetricCard, metric_cards};
use crate::metrics::{compute_countdown, derive_metrics};

/// # Summary
/// 单次页面渲染所需的全部数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub metrics: DerivedMetrics,
    pub countdown: Countdown,
    pub cards: Vec<MetricCard>,
    pub chart: ChartSpec,
}

/// # Summary
/// 仪表盘应用服务门面 (Facade)。
/// 编译期只依赖 `halving-core` 中的 Trait，加载器与时钟由构造函数注入。
///
/// # Invariants
/// - 每次调用独立执行 加载 → 派生 → 构建，调用之间不共享可变状态 (加载器缓存除外)。
/// - 任何方法都不会失败，数据故障已由加载器吸收。
pub struct DashboardService {
    // 价格序列加载器
    loader: Arc<dyn PriceLoader>,
    // 时钟 (倒计时)
    clock: Arc<dyn TimeProvider>,
    // 仪表盘配置
    config: DashboardConfig,
}

impl DashboardService {
    /// # Summary
    /// 创建 DashboardService 实例。
    ///
    /// # Arguments
    /// * `loader` - 价格序列加载器的具体实现。
    /// * `clock` - 时间供给器。
    /// * `config` - 启动时构造一次的仪表盘配置。
    ///
    /// # Returns
    /// * `Arc<Self>` - 可共享的服务实例。
    pub fn new(
        loader: Arc<dyn PriceLoader>,
        clock: Arc<dyn TimeProvider>,
        config: DashboardConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            loader,
            clock,
            config,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// 加载序列并派生指标
    pub async fn metrics(&self) -> DerivedMetrics {
        let series = self.loader.load().await;
        derive_metrics(&series)
    }

    /// 以当前本地时间计算到减半目标的倒计时
    pub fn countdown(&self) -> Countdown {
        compute_countdown(self.config.countdown_target, self.clock.now_local())
    }

    /// 加载序列并构建指定刻度的图表
    pub async fn chart(&self, scale_mode: ScaleMode) -> ChartSpec {
        let series = self.loader.load().await;
        build_chart(&series, scale_mode, &self.config.halving_markers)
    }

    pub fn projections(&self) -> &ProjectionConfig {
        &self.config.projections
    }

    /// # Summary
    /// 生成一次页面浏览所需的完整快照。
    ///
    /// # Logic
    /// 1. 只加载一次序列，指标与图表共用同一份数据。
    /// 2. 计算倒计时并生成指标卡片。
    pub async fn snapshot(&self, scale_mode: ScaleMode) -> DashboardSnapshot {
        let series = self.loader.load().await;
        let metrics = derive_metrics(&series);
        let countdown = self.countdown();
        let cards = metric_cards(
            &metrics,
            &countdown,
            self.config.countdown_target.year(),
            &self.config.projections,
        );
        let chart = build_chart(&series, scale_mode, &self.config.halving_markers);

        DashboardSnapshot {
            metrics,
            countdown,
            cards,
            chart,
        }
    }

    /// 手动失效加载缓存，下一次请求重新读取数据文件
    pub async fn reload(&self) {
        self.loader.invalidate().await;
    }
}
