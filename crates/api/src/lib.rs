//! # `halving-api` - HTTP API 网关
//!
//! 本 crate 是减半追踪仪表盘的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收渲染端 (浏览器页面) 的 HTTP 请求
//! - 调用下层 `DashboardService` 完成 加载 → 派生 → 构建
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
