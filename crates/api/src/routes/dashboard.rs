//! # 仪表盘路由控制器
//!
//! 实现 `/api/v1/dashboard` 路径下的 REST 接口。
//! 每个请求独立执行一次 加载 → 派生 → 构建，渲染端据此绘制整页。

use axum::Json;
use axum::extract::{Query, State};
use halving_core::common::ScaleMode;
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{
    ApiResponse, ChartResponse, CountdownResponse, DashboardResponse, MetricsResponse,
    ProjectionResponse, ReloadResponse,
};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ScaleQuery {
    /// `log` (默认) 或 `linear`
    pub scale: Option<String>,
}

impl ScaleQuery {
    /// 解析刻度参数，缺省为对数刻度
    fn scale_mode(&self) -> Result<ScaleMode, ApiError> {
        match self.scale.as_deref() {
            None => Ok(ScaleMode::default()),
            Some(raw) => raw.parse().map_err(ApiError::BadRequest),
        }
    }
}

// ============================================================
//  Handler 实现
// ============================================================

/// 获取整页仪表盘数据
///
/// 序列只加载一次，指标、倒计时、卡片、图表与预测数据一并返回。
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "仪表盘 (Dashboard)",
    params(
        ("scale" = Option<String>, Query, description = "纵轴刻度: log (默认) 或 linear")
    ),
    responses(
        (status = 200, description = "仪表盘数据获取成功", body = ApiResponse<DashboardResponse>),
        (status = 400, description = "刻度参数非法")
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<ScaleQuery>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let scale_mode = query.scale_mode()?;
    let snapshot = state.dashboard.snapshot(scale_mode).await;
    let target = state.dashboard.config().countdown_target;

    let response = DashboardResponse {
        metrics: snapshot.metrics.into(),
        countdown: CountdownResponse::new(snapshot.countdown, target),
        cards: snapshot.cards.into_iter().map(Into::into).collect(),
        chart: snapshot.chart.into(),
        projections: state.dashboard.projections().into(),
    };
    Ok(Json(ApiResponse::ok(response)))
}

/// 获取派生指标
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/metrics",
    tag = "仪表盘 (Dashboard)",
    responses(
        (status = 200, description = "派生指标获取成功", body = ApiResponse<MetricsResponse>)
    )
)]
pub async fn get_metrics(State(state): State<AppState>) -> Json<ApiResponse<MetricsResponse>> {
    let metrics = state.dashboard.metrics().await;
    Json(ApiResponse::ok(metrics.into()))
}

/// 获取距下一次减半的倒计时
///
/// 以服务端本地时间计算，目标时刻已过时 `elapsed` 为 true 且各分量为 0。
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/countdown",
    tag = "仪表盘 (Dashboard)",
    responses(
        (status = 200, description = "倒计时获取成功", body = ApiResponse<CountdownResponse>)
    )
)]
pub async fn get_countdown(State(state): State<AppState>) -> Json<ApiResponse<CountdownResponse>> {
    let countdown = state.dashboard.countdown();
    let target = state.dashboard.config().countdown_target;
    Json(ApiResponse::ok(CountdownResponse::new(countdown, target)))
}

/// 获取价格折线图描述
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/chart",
    tag = "仪表盘 (Dashboard)",
    params(
        ("scale" = Option<String>, Query, description = "纵轴刻度: log (默认) 或 linear")
    ),
    responses(
        (status = 200, description = "图表描述获取成功", body = ApiResponse<ChartResponse>),
        (status = 400, description = "刻度参数非法")
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<ScaleQuery>,
) -> Result<Json<ApiResponse<ChartResponse>>, ApiError> {
    let scale_mode = query.scale_mode()?;
    let chart = state.dashboard.chart(scale_mode).await;
    Ok(Json(ApiResponse::ok(chart.into())))
}

/// 获取静态预测数据
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/projections",
    tag = "仪表盘 (Dashboard)",
    responses(
        (status = 200, description = "预测数据获取成功", body = ApiResponse<ProjectionResponse>)
    )
)]
pub async fn get_projections(
    State(state): State<AppState>,
) -> Json<ApiResponse<ProjectionResponse>> {
    Json(ApiResponse::ok(state.dashboard.projections().into()))
}

/// 失效价格序列缓存
///
/// 下一次请求将重新读取数据文件。
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/reload",
    tag = "仪表盘 (Dashboard)",
    responses(
        (status = 200, description = "缓存已失效", body = ApiResponse<ReloadResponse>)
    )
)]
pub async fn reload(State(state): State<AppState>) -> Json<ApiResponse<ReloadResponse>> {
    state.dashboard.reload().await;
    tracing::info!("price series cache invalidated by request");
    Json(ApiResponse::ok(ReloadResponse { invalidated: true }))
}

/// 未匹配路由的 JSON 404 响应
pub async fn not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
