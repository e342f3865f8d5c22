//! 应用程序初始化和启动
//!
//! 负责完整启动流程，包括：
//! - 配置读取
//! - 日志系统初始化
//! - 模型、缩放器和背景图片加载（任一失败即终止启动）
//! - 路由注册
//! - HTTP 服务启动

use std::net::SocketAddr;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::commands::*;
use crate::context::ArtifactContext;
use crate::logger;
use crate::settings::{AppSettings, SettingsManager};
use crate::AppState;

/// 注册所有路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_api))
        .route("/api/features", get(list_features))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// 加载运行上下文
///
/// 在绑定端口之前完成，文件缺失时不会有任何请求被处理
pub async fn build_state(settings: &AppSettings) -> Result<AppState> {
    let context = ArtifactContext::load(&settings.artifacts).await?;
    Ok(AppState::new(context))
}

/// 应用程序入口点
pub async fn run() -> Result<()> {
    let settings_manager = SettingsManager::new(SettingsManager::default_path()).await?;
    let settings = settings_manager.get().clone();

    // 保持 guard 在整个程序生命周期
    let _log_guard = logger::init(&settings.logging)?;
    info!("初始化电池续航预测器...");
    info!("配置文件: {:?}", settings_manager.path());

    let state = match build_state(&settings).await {
        Ok(state) => state,
        Err(e) => {
            error!("资源加载失败，终止启动: {}", e);
            return Err(e);
        }
    };

    let addr: SocketAddr = settings.server.address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("服务已启动: http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("监听退出信号失败: {}", e);
    }
}
