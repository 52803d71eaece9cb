//! # `halving-core` - 领域模型与端口
//!
//! 定义价格序列、派生指标、图表描述等实体，以及数据源、加载器、缓存的抽象接口。
//! 本 crate 不包含任何 I/O 实现。

pub mod cache;
pub mod chart;
pub mod common;
pub mod config;
pub mod market;
pub mod metrics;
