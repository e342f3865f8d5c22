//! 查询命令
//!
//! - 滑块规格查询
//! - 服务健康检查

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::{FeatureSpec, FEATURE_SPECS};
use crate::AppState;

/// 健康检查结果
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub scaler: &'static str,
    pub model: &'static str,
}

/// 获取输入滑块规格
pub async fn list_features() -> Json<Vec<FeatureSpec>> {
    Json(FEATURE_SPECS.to_vec())
}

/// 健康检查
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let pipeline = state.context.pipeline();
    Json(HealthStatus {
        status: "ok",
        scaler: pipeline.scaler_kind(),
        model: pipeline.model_kind(),
    })
}
