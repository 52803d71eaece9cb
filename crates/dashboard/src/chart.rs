use halving_core::chart::entity::{ChartLayout, ChartSpec, HalvingMarker};
use halving_core::common::ScaleMode;
use halving_core::market::entity::PriceSeries;
use tracing::debug;

/// # Summary
/// 组装声明式折线图描述。
///
/// # Logic
/// 1. x 轴为日期，y 轴为价格，纵轴使用请求的刻度模式。
/// 2. 每个减半标注都附加为竖线，无论其日期是否落在序列范围内。
/// 3. 对数刻度叠加非正价格属于已知限制：不校验、不修正，原样返回。
///
/// # Arguments
/// * `series`: 价格序列。
/// * `scale_mode`: 纵轴刻度。
/// * `markers`: 减半日期标注。
///
/// # Returns
/// 不可变的图表描述，不执行任何 I/O。
pub fn build_chart(
    series: &PriceSeries,
    scale_mode: ScaleMode,
    markers: &[HalvingMarker],
) -> ChartSpec {
    if scale_mode == ScaleMode::Log && series.has_non_positive_price() {
        debug!("log scale requested over non-positive prices; rendering is undefined");
    }

    ChartSpec {
        series: series.clone(),
        scale_mode,
        markers: markers.to_vec(),
        layout: ChartLayout::default(),
    }
}
