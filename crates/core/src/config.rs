use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::entity::HalvingMarker;

/// 下一次减半的预估日期 (本地时间 0 点为倒计时目标)
pub const NEXT_HALVING_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2028, 4, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// 倒计时目标：2028-04-01 00:00 本地时间
pub const COUNTDOWN_TARGET: NaiveDateTime = NaiveDateTime::new(NEXT_HALVING_DATE, NaiveTime::MIN);

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// # Summary
/// 仪表盘配置，启动时构造一次并显式传递给加载器、指标派生与图表构建。
///
/// # Invariants
/// - `countdown_target` 与 `halving_markers` 为固定常量，不接受外部配置覆盖。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    // 价格历史 JSON 文件路径
    pub data_path: String,
    // 倒计时目标 (本地时间)
    #[serde(skip, default = "default_countdown_target")]
    pub countdown_target: NaiveDateTime,
    // 图表上的历史减半标注
    #[serde(skip, default = "default_halving_markers")]
    pub halving_markers: Vec<HalvingMarker>,
    // 静态预测数据
    pub projections: ProjectionConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: "data/btc_data.json".to_string(),
            countdown_target: default_countdown_target(),
            halving_markers: default_halving_markers(),
            projections: ProjectionConfig::default(),
        }
    }
}

fn default_countdown_target() -> NaiveDateTime {
    COUNTDOWN_TARGET
}

/// 历史减半日期
pub fn default_halving_markers() -> Vec<HalvingMarker> {
    [
        ((2012, 11, 28), "Halving 2012"),
        ((2016, 7, 9), "Halving 2016"),
        ((2020, 5, 11), "Halving 2020"),
        ((2024, 4, 20), "Halving 2024"),
    ]
    .into_iter()
    .filter_map(|((y, m, d), label)| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| HalvingMarker::new(date, label))
    })
    .collect()
}

/// # Summary
/// 单个减半周期的涨幅记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReturn {
    // 周期名称，例如 "2012"
    pub cycle: String,
    // 周期涨幅 (%)，None 表示周期仍在进行
    pub return_pct: Option<Decimal>,
}

/// # Summary
/// 页面展示的静态预测数据，按原样输出，不参与任何计算。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    // 当前减半纪元
    pub current_epoch: u32,
    // 当前区块奖励 (BTC)
    pub block_reward_btc: Decimal,
    // 下一次减半的预估时间描述
    pub next_halving_estimate: String,
    // 年化发行率 (%)
    pub annual_emission_rate_pct: Decimal,
    // 历史周期涨幅
    pub cycle_returns: Vec<CycleReturn>,
    // 本周期顶部的预估时间
    pub cycle_peak_estimate: String,
    // 保守目标价 (USD)
    pub conservative_target_usd: Decimal,
    // 乐观目标价 (USD)
    pub optimistic_target_usd: Decimal,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            current_epoch: 5,
            block_reward_btc: Decimal::new(3125, 3),
            next_halving_estimate: "April 2028".to_string(),
            annual_emission_rate_pct: Decimal::new(84, 2),
            cycle_returns: vec![
                CycleReturn {
                    cycle: "2012".to_string(),
                    return_pct: Some(Decimal::new(7371, 0)),
                },
                CycleReturn {
                    cycle: "2016".to_string(),
                    return_pct: Some(Decimal::new(2785, 0)),
                },
                CycleReturn {
                    cycle: "2024".to_string(),
                    return_pct: None,
                },
            ],
            cycle_peak_estimate: "mid-2025".to_string(),
            conservative_target_usd: Decimal::new(120_000, 0),
            optimistic_target_usd: Decimal::new(180_000, 0),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    // 默认过滤级别，可被 RUST_LOG 覆盖
    pub level: String,
    // 滚动日志目录，为空则只输出到控制台
    pub dir: Option<String>,
    // 日志文件名前缀
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: Some("logs".to_string()),
            file_prefix: "halving.log".to_string(),
        }
    }
}
