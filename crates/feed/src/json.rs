use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use halving_core::market::entity::PricePoint;
use halving_core::market::error::MarketError;
use halving_core::market::port::PriceHistoryProvider;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// # Summary
/// 本地 JSON 文件价格数据源。
///
/// # Invariants
/// - 文件内容为 `[{"date": "...", "price": <number>}, ...]`，数组顺序即时间顺序。
/// - 只读访问，从不写入文件。
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    // 数据文件路径
    path: PathBuf,
    // 缓存键 (路径的字符串形式)
    key: String,
}

impl JsonFileProvider {
    /// # Summary
    /// 创建指向固定路径的数据源，构造时不访问文件系统。
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = path.to_string_lossy().into_owned();
        Self { path, key }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// # Summary
/// JSON 文件中的原始记录。
#[derive(Deserialize, Debug)]
struct RawPricePoint {
    date: String,
    price: Decimal,
}

/// # Summary
/// 将 ISO-8601 字符串解析为日历日期。
///
/// # Logic
/// 1. 纯日期 `2024-01-01`。
/// 2. 带时区的时间戳 (RFC 3339 或 `+hhmm` 偏移)，取其自身时区下的日期。
/// 3. 不带时区或以 `Z` 结尾的日期时间 (`T` 或空格分隔，秒与小数秒可省略)。
///
/// # Returns
/// 无法识别时返回 `MarketError::Parse`。
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, MarketError> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(ts) = DateTime::parse_from_str(s, fmt) {
            return Ok(ts.date_naive());
        }
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Ok(ts.date());
        }
    }
    Err(MarketError::Parse(format!("Unrecognized date: {}", raw)))
}

fn map_io_error(path: &Path, err: std::io::Error) -> MarketError {
    if err.kind() == ErrorKind::NotFound {
        MarketError::NotFound(path.display().to_string())
    } else {
        MarketError::Io(format!("{}: {}", path.display(), err))
    }
}

/// # Summary
/// 将原始 JSON 字节解析为价格点列表。
///
/// # Logic
/// 1. 反序列化为原始记录数组。
/// 2. 逐条解析日期，拒绝负价格。
/// 3. 保持原始顺序，不排序。
pub fn parse_price_history(bytes: &[u8]) -> Result<Vec<PricePoint>, MarketError> {
    let raw: Vec<RawPricePoint> =
        serde_json::from_slice(bytes).map_err(|e| MarketError::Parse(e.to_string()))?;

    raw.into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let date = parse_calendar_date(&record.date)
                .map_err(|e| MarketError::Parse(format!("record {}: {}", idx, e)))?;
            if record.price < Decimal::ZERO {
                return Err(MarketError::InvalidPrice(format!(
                    "record {}: {}",
                    idx, record.price
                )));
            }
            Ok(PricePoint {
                date,
                price: record.price,
            })
        })
        .collect()
}

#[async_trait]
impl PriceHistoryProvider for JsonFileProvider {
    fn source_key(&self) -> &str {
        &self.key
    }

    /// # Summary
    /// 以文件修改时间作为指纹。
    ///
    /// # Logic
    /// 1. 读取文件元数据。
    /// 2. 平台不支持修改时间时返回 `None`。
    async fn fingerprint(&self) -> Result<Option<DateTime<Utc>>, MarketError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| map_io_error(&self.path, e))?;
        Ok(meta.modified().ok().map(DateTime::<Utc>::from))
    }

    async fn fetch_history(&self) -> Result<Vec<PricePoint>, MarketError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| map_io_error(&self.path, e))?;
        let points = parse_price_history(&bytes)?;
        tracing::debug!(path = %self.path.display(), points = points.len(), "price history parsed");
        Ok(points)
    }
}
