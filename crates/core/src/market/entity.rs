use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market::error::MarketError;

/// # Summary
/// 单个价格观测点，记录某一观测周期 (样例数据为周线) 的收盘价。
///
/// # Invariants
/// - `price` 非负，单位为 USD。
/// - 序列化时 `price` 以十进制字符串表示，缓存往返不损失精度。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    // 观测日期
    pub date: NaiveDate,
    // 收盘价 (USD)
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

// 仅用于满足 `current` 的返回类型，非空序列永远不会取到它
const UNREACHABLE_POINT: PricePoint = PricePoint {
    date: NaiveDate::MIN,
    price: Decimal::ZERO,
};

/// # Summary
/// 按时间顺序排列的价格序列，插入顺序即时间顺序。
///
/// # Invariants
/// - 序列永不为空：构造函数拒绝空输入，降级序列恒含一个点。
/// - 加载完成后不可变，最后一个元素视为"当前"。
/// - 日期不要求唯一，也不会被重新排序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// # Summary
    /// 由有序价格点构建序列。
    ///
    /// # Arguments
    /// * `points`: 按时间顺序排列的价格点。
    ///
    /// # Returns
    /// 输入为空时返回 `MarketError::Empty`。
    pub fn new(points: Vec<PricePoint>) -> Result<Self, MarketError> {
        if points.is_empty() {
            return Err(MarketError::Empty);
        }
        Ok(Self { points })
    }

    /// # Summary
    /// 构建数据不可用时的单点占位序列 `[{date: today, price: 0}]`。
    ///
    /// # Arguments
    /// * `today`: 调用方本地时区下的当前日历日期。
    pub fn fallback(today: NaiveDate) -> Self {
        Self {
            points: vec![PricePoint {
                date: today,
                price: Decimal::ZERO,
            }],
        }
    }

    /// 全部价格点 (时间顺序)
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 序列恒非空，保留此方法以满足 `len` 的惯例
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// # Summary
    /// 获取当前价格点，即时间顺序上的最后一个元素。
    pub fn current(&self) -> &PricePoint {
        self.points.last().unwrap_or(&UNREACHABLE_POINT)
    }

    /// # Summary
    /// 序列内的最高价。
    pub fn max_price(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.price)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// 是否存在非正价格 (对数刻度下无意义)
    pub fn has_non_positive_price(&self) -> bool {
        self.points.iter().any(|p| p.price <= Decimal::ZERO)
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = MarketError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}
