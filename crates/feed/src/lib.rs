//! # `halving-feed` - 价格历史数据源
//!
//! 目前只有本地 JSON 文件一种实现。

pub mod json;
