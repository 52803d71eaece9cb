//! # `halving-cache` - 加载结果的内存记忆化存储

pub mod mem;
