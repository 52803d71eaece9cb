use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

pub mod time;

/// # Summary
/// 图表纵轴刻度模式，由浏览者在前端切换。
///
/// # Invariants
/// - 对数刻度只对正价格有意义，非正价格的渲染结果由渲染端决定。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    // 对数刻度 (默认)
    #[default]
    Log,
    // 线性刻度
    Linear,
}

impl FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "logarithmic" => Ok(ScaleMode::Log),
            "linear" => Ok(ScaleMode::Linear),
            _ => Err(format!("Unknown ScaleMode: {}", s)),
        }
    }
}

impl std::fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleMode::Log => write!(f, "log"),
            ScaleMode::Linear => write!(f, "linear"),
        }
    }
}
