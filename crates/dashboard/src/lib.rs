//! # `halving-dashboard` - 仪表盘领域实现
//!
//! 每次页面请求执行一次 加载 → 派生指标 → 构建图表 的单向流程：
//! - [`loader`]: 带记忆化与降级的价格序列加载器
//! - [`metrics`]: 当前价、历史最高、距最高价百分比与倒计时
//! - [`chart`]: 声明式折线图描述
//! - [`format`]: 面向展示的货币与百分比格式化
//! - [`service`]: 串联以上步骤的门面

pub mod chart;
pub mod format;
pub mod loader;
pub mod metrics;
pub mod service;
