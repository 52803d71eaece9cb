use halving_core::config::ProjectionConfig;
use halving_core::metrics::entity::{Countdown, DerivedMetrics};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 在整数字符串中每三位插入千分位逗号
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// # Summary
/// 格式化为不带小数的美元金额，例如 `$60,000`。
///
/// # Logic
/// 1. 按远离零的方式舍入到整数。
/// 2. 整数部分加千分位逗号。
/// 3. 负数的符号置于美元符号之前。
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&digits))
}

/// # Summary
/// 格式化为保留一位小数的百分比，例如 `-14.3%`。
pub fn format_ratio_pct(pct: Decimal) -> String {
    let rounded = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}

/// # Summary
/// 格式化带符号的整数百分比，例如 `+7,371%`，用于周期涨幅展示。
pub fn format_return_pct(pct: Decimal) -> String {
    let rounded = pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "+" };
    format!("{}{}%", sign, group_thousands(&digits))
}

/// # Summary
/// 页面顶部的指标卡片。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub badge: Option<String>,
}

/// # Summary
/// 生成四张指标卡片：当前价、历史最高、下一次减半、发行率。
///
/// # Logic
/// 1. 金额使用 `format_usd`，距最高价百分比作为最高价卡片的角标。
/// 2. 下一次减半卡片的剩余天数取自倒计时，已过目标时显示 "Elapsed"。
pub fn metric_cards(
    metrics: &DerivedMetrics,
    countdown: &Countdown,
    next_halving_year: i32,
    projections: &ProjectionConfig,
) -> Vec<MetricCard> {
    let halving_badge = if countdown.elapsed {
        "Elapsed".to_string()
    } else {
        format!("~{} days", countdown.days)
    };

    vec![
        MetricCard {
            label: "Current Price".to_string(),
            value: format_usd(metrics.current_price),
            badge: None,
        },
        MetricCard {
            label: "All-Time High".to_string(),
            value: format_usd(metrics.all_time_high),
            badge: Some(format!("{} ATH", format_ratio_pct(metrics.ath_ratio_pct))),
        },
        MetricCard {
            label: "Next Halving".to_string(),
            value: next_halving_year.to_string(),
            badge: Some(halving_badge),
        },
        MetricCard {
            label: "Emission Rate".to_string(),
            value: format!("{}%", projections.annual_emission_rate_pct),
            badge: Some("Deflationary".to_string()),
        },
    ]
}
