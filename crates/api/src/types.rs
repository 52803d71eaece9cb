//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向渲染端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 金额以字符串输出以保留精度，另附展示用的格式化字符串；图表坐标为数值。

use chrono::NaiveDateTime;
use halving_core::common::ScaleMode;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use halving_dashboard::format::{format_ratio_pct, format_return_pct, format_usd};

// ============================================================
//  指标相关 DTO
// ============================================================

/// 派生指标 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    /// 当前价格 (USD)
    #[schema(example = "60000")]
    pub current_price: String,
    /// 序列内最高价 (USD)
    #[schema(example = "70000")]
    pub all_time_high: String,
    /// 距最高价百分比
    #[schema(example = "-14.285714285714285714285714290")]
    pub ath_ratio_pct: String,
    /// 当前价格展示文本
    #[schema(example = "$60,000")]
    pub current_price_display: String,
    /// 最高价展示文本
    #[schema(example = "$70,000")]
    pub all_time_high_display: String,
    /// 百分比展示文本
    #[schema(example = "-14.3%")]
    pub ath_ratio_display: String,
}

/// 倒计时 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountdownResponse {
    #[schema(example = 529)]
    pub days: u64,
    #[schema(example = 10)]
    pub hours: u32,
    #[schema(example = 29)]
    pub minutes: u32,
    #[schema(example = 45)]
    pub seconds: u32,
    /// 目标时刻是否已经过去
    #[schema(example = false)]
    pub elapsed: bool,
    /// 目标时刻 (本地时间, ISO 8601)
    #[schema(example = "2028-04-01T00:00:00")]
    pub target: String,
}

impl CountdownResponse {
    pub fn new(countdown: halving_core::metrics::entity::Countdown, target: NaiveDateTime) -> Self {
        Self {
            days: countdown.days,
            hours: countdown.hours,
            minutes: countdown.minutes,
            seconds: countdown.seconds,
            elapsed: countdown.elapsed,
            target: target.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// 指标卡片 DTO - 对应页面顶部的四张卡片
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricCardResponse {
    #[schema(example = "All-Time High")]
    pub label: String,
    #[schema(example = "$70,000")]
    pub value: String,
    #[schema(example = "-14.3% ATH")]
    pub badge: Option<String>,
}

// ============================================================
//  图表相关 DTO
// ============================================================

/// 减半标注 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HalvingMarkerResponse {
    /// 标注日期 (ISO 8601)
    #[schema(example = "2024-04-20")]
    pub date: String,
    #[schema(example = "Halving 2024")]
    pub label: String,
}

/// 折线样式 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TraceStyleResponse {
    #[schema(example = "BTC")]
    pub name: String,
    #[schema(example = "#f97316")]
    pub line_color: String,
    #[schema(example = 3.5)]
    pub line_width: f64,
    pub fill_to_zero: bool,
    #[schema(example = "rgba(249, 115, 22, 0.04)")]
    pub fill_color: String,
}

/// 图表布局 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartLayoutResponse {
    #[schema(example = 450)]
    pub height: u32,
    #[schema(example = "x unified")]
    pub hover_mode: String,
    #[schema(example = "$,")]
    pub y_tick_format: String,
    pub trace: TraceStyleResponse,
}

/// 折线图描述 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartResponse {
    /// 纵轴刻度
    pub scale_mode: ScaleMode,
    /// 横轴日期 (ISO 8601)
    pub x: Vec<String>,
    /// 纵轴价格 (USD)
    pub y: Vec<f64>,
    /// 减半竖线标注
    pub markers: Vec<HalvingMarkerResponse>,
    pub layout: ChartLayoutResponse,
}

// ============================================================
//  预测相关 DTO
// ============================================================

/// 周期涨幅 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CycleReturnResponse {
    #[schema(example = "2012")]
    pub cycle: String,
    /// 涨幅 (%)，周期进行中为 null
    #[schema(example = "7371")]
    pub return_pct: Option<String>,
    #[schema(example = "+7,371%")]
    pub display: String,
}

/// 静态预测数据 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectionResponse {
    #[schema(example = 5)]
    pub current_epoch: u32,
    #[schema(example = "3.125")]
    pub block_reward_btc: String,
    #[schema(example = "April 2028")]
    pub next_halving_estimate: String,
    #[schema(example = "0.84")]
    pub annual_emission_rate_pct: String,
    pub cycle_returns: Vec<CycleReturnResponse>,
    #[schema(example = "mid-2025")]
    pub cycle_peak_estimate: String,
    #[schema(example = "$120,000")]
    pub conservative_target: String,
    #[schema(example = "$180,000")]
    pub optimistic_target: String,
}

/// 单次页面浏览的完整数据 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub metrics: MetricsResponse,
    pub countdown: CountdownResponse,
    pub cards: Vec<MetricCardResponse>,
    pub chart: ChartResponse,
    pub projections: ProjectionResponse,
}

/// 缓存重载结果 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReloadResponse {
    #[schema(example = true)]
    pub invalidated: bool,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 → DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<halving_core::metrics::entity::DerivedMetrics> for MetricsResponse {
    fn from(m: halving_core::metrics::entity::DerivedMetrics) -> Self {
        Self {
            current_price: m.current_price.to_string(),
            all_time_high: m.all_time_high.to_string(),
            ath_ratio_pct: m.ath_ratio_pct.to_string(),
            current_price_display: format_usd(m.current_price),
            all_time_high_display: format_usd(m.all_time_high),
            ath_ratio_display: format_ratio_pct(m.ath_ratio_pct),
        }
    }
}

impl From<halving_dashboard::format::MetricCard> for MetricCardResponse {
    fn from(c: halving_dashboard::format::MetricCard) -> Self {
        Self {
            label: c.label,
            value: c.value,
            badge: c.badge,
        }
    }
}

impl From<halving_core::chart::entity::HalvingMarker> for HalvingMarkerResponse {
    fn from(m: halving_core::chart::entity::HalvingMarker) -> Self {
        Self {
            date: m.date.to_string(),
            label: m.label,
        }
    }
}

impl From<halving_core::chart::entity::ChartLayout> for ChartLayoutResponse {
    fn from(l: halving_core::chart::entity::ChartLayout) -> Self {
        Self {
            height: l.height,
            hover_mode: l.hover_mode,
            y_tick_format: l.y_tick_format,
            trace: TraceStyleResponse {
                name: l.trace.name,
                line_color: l.trace.line_color,
                line_width: l.trace.line_width,
                fill_to_zero: l.trace.fill_to_zero,
                fill_color: l.trace.fill_color,
            },
        }
    }
}

impl From<halving_core::chart::entity::ChartSpec> for ChartResponse {
    fn from(spec: halving_core::chart::entity::ChartSpec) -> Self {
        Self {
            scale_mode: spec.scale_mode,
            x: spec.x_values().iter().map(ToString::to_string).collect(),
            y: spec
                .y_values()
                .iter()
                .map(|p| p.to_f64().unwrap_or_default())
                .collect(),
            markers: spec.markers.into_iter().map(Into::into).collect(),
            layout: spec.layout.into(),
        }
    }
}

impl From<&halving_core::config::ProjectionConfig> for ProjectionResponse {
    fn from(p: &halving_core::config::ProjectionConfig) -> Self {
        Self {
            current_epoch: p.current_epoch,
            block_reward_btc: p.block_reward_btc.to_string(),
            next_halving_estimate: p.next_halving_estimate.clone(),
            annual_emission_rate_pct: p.annual_emission_rate_pct.to_string(),
            cycle_returns: p
                .cycle_returns
                .iter()
                .map(|c| CycleReturnResponse {
                    cycle: c.cycle.clone(),
                    return_pct: c.return_pct.map(|r| r.to_string()),
                    display: c
                        .return_pct
                        .map(format_return_pct)
                        .unwrap_or_else(|| "In progress".to_string()),
                })
                .collect(),
            cycle_peak_estimate: p.cycle_peak_estimate.clone(),
            conservative_target: format_usd(p.conservative_target_usd),
            optimistic_target: format_usd(p.optimistic_target_usd),
        }
    }
}
