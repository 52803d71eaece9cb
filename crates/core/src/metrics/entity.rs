use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 由价格序列派生的标量指标，每次渲染重新计算，不持久化。
///
/// # Invariants
/// - `all_time_high >= current_price`。
/// - `ath_ratio_pct <= 0`，当前价等于最高价时恰为 0。
/// - `all_time_high` 为 0 (仅降级序列可能出现) 时 `ath_ratio_pct` 取哨兵值 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    // 当前价格 (序列最后一个点)
    pub current_price: Decimal,
    // 序列内最高价
    pub all_time_high: Decimal,
    // 距最高价的百分比 (当前价 - 最高价) / 最高价 * 100
    pub ath_ratio_pct: Decimal,
}

/// # Summary
/// 距离目标时刻的倒计时分解。
///
/// # Invariants
/// - `hours < 24`，`minutes < 60`，`seconds < 60`。
/// - 目标已过时各分量为 0 且 `elapsed` 为 true。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    // 目标时刻是否已经过去
    pub elapsed: bool,
}

impl Countdown {
    /// 目标已过时的倒计时
    pub const ELAPSED: Countdown = Countdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        elapsed: true,
    };

    /// 将分解后的各分量重新组合为总秒数
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400
            + u64::from(self.hours) * 3_600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }
}
