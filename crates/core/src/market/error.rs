use thiserror::Error;

/// # Summary
/// 价格数据域错误枚举，处理资源缺失、读取及解析失败。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 这些错误只在加载器内部流转，最终被降级序列吸收，不会越过加载器边界。
#[derive(Error, Debug)]
pub enum MarketError {
    // 数据资源不存在
    #[error("Resource not found: {0}")]
    NotFound(String),
    // 读取资源失败
    #[error("IO error: {0}")]
    Io(String),
    // 数据解析错误，如 JSON 格式或日期格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 价格非法 (负数)
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    // 资源中没有任何价格点
    #[error("Price series is empty")]
    Empty,
}
