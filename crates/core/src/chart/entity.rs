use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::ScaleMode;
use crate::market::entity::PriceSeries;

/// # Summary
/// 图表上的减半日期竖线标注，静态常量，与价格序列无关。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalvingMarker {
    // 减半日期
    pub date: NaiveDate,
    // 标注文字
    pub label: String,
}

impl HalvingMarker {
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            date,
            label: label.into(),
        }
    }
}

/// # Summary
/// 价格折线的视觉样式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStyle {
    // 图例名称
    pub name: String,
    // 折线颜色
    pub line_color: String,
    // 折线宽度 (像素)
    pub line_width: f64,
    // 是否填充至零轴
    pub fill_to_zero: bool,
    // 填充颜色
    pub fill_color: String,
}

/// # Summary
/// 图表整体布局参数，由渲染端解释。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    // 图表高度 (像素)
    pub height: u32,
    // 悬停提示模式
    pub hover_mode: String,
    // 纵轴刻度格式
    pub y_tick_format: String,
    // 价格折线样式
    pub trace: TraceStyle,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            height: 450,
            hover_mode: "x unified".to_string(),
            y_tick_format: "$,".to_string(),
            trace: TraceStyle {
                name: "BTC".to_string(),
                line_color: "#f97316".to_string(),
                line_width: 3.5,
                fill_to_zero: true,
                fill_color: "rgba(249, 115, 22, 0.04)".to_string(),
            },
        }
    }
}

/// # Summary
/// 声明式折线图描述，交由渲染端绘制：x 为日期，y 为价格。
///
/// # Invariants
/// - 构建后不可变，不包含任何 I/O 句柄。
/// - 对数刻度叠加非正价格时不做校正，渲染结果未定义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub series: PriceSeries,
    pub scale_mode: ScaleMode,
    pub markers: Vec<HalvingMarker>,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// 横轴数据
    pub fn x_values(&self) -> Vec<NaiveDate> {
        self.series.points().iter().map(|p| p.date).collect()
    }

    /// 纵轴数据
    pub fn y_values(&self) -> Vec<Decimal> {
        self.series.points().iter().map(|p| p.price).collect()
    }
}
