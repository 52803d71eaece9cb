use chrono::NaiveDateTime;
use halving_core::market::entity::PriceSeries;
use halving_core::metrics::entity::{Countdown, DerivedMetrics};
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// # Summary
/// 从价格序列派生当前价、历史最高价与距最高价百分比。
///
/// # Logic
/// 1. 当前价取时间顺序上的最后一个点。
/// 2. 最高价取整个序列的最大值 (包含当前点，因此恒不小于当前价)。
/// 3. 百分比 = (当前价 - 最高价) / 最高价 * 100。
/// 4. 最高价为 0 时 (只可能来自降级序列) 百分比取哨兵值 0。
///
/// # Arguments
/// * `series`: 非空价格序列。
///
/// # Returns
/// 派生指标。
pub fn derive_metrics(series: &PriceSeries) -> DerivedMetrics {
    let current_price = series.current().price;
    let all_time_high = series.max_price();

    let ath_ratio_pct = if all_time_high.is_zero() {
        Decimal::ZERO
    } else {
        (current_price - all_time_high) / all_time_high * Decimal::ONE_HUNDRED
    };

    DerivedMetrics {
        current_price,
        all_time_high,
        ath_ratio_pct,
    }
}

/// # Summary
/// 计算从 `now` 到 `target` 的倒计时分解。
///
/// # Logic
/// 1. 差值按秒截断，丢弃不足一秒的部分。
/// 2. 依次分解为天、时、分、秒，每一级都截断而非四舍五入。
/// 3. 目标已到达或已过去时返回 `Countdown::ELAPSED` (各分量为 0)。
///
/// # Arguments
/// * `target`: 目标时刻 (本地墙上时间)。
/// * `now`: 当前时刻，与 `target` 处于同一时间参照系。
pub fn compute_countdown(target: NaiveDateTime, now: NaiveDateTime) -> Countdown {
    let delta = target - now;
    if delta <= chrono::TimeDelta::zero() {
        return Countdown::ELAPSED;
    }

    let total = delta.num_seconds();
    let days = total / SECONDS_PER_DAY;
    let rem = total % SECONDS_PER_DAY;

    Countdown {
        days: u64::try_from(days).unwrap_or_default(),
        hours: u32::try_from(rem / SECONDS_PER_HOUR).unwrap_or_default(),
        minutes: u32::try_from(rem % SECONDS_PER_HOUR / SECONDS_PER_MINUTE).unwrap_or_default(),
        seconds: u32::try_from(rem % SECONDS_PER_MINUTE).unwrap_or_default(),
        elapsed: false,
    }
}
