// 电池续航预测器 - 主库

// 声明模块
pub mod app;
pub mod background;
pub mod collector;
pub mod commands;
pub mod context;
pub mod inference;
pub mod logger;
pub mod models;
pub mod presentation;
pub mod settings;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use context::ArtifactContext;

pub use app::run;

/// 应用状态
///
/// 只包含启动时加载的只读上下文，请求之间不共享其他状态
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ArtifactContext>,
}

impl AppState {
    pub fn new(context: ArtifactContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }
}
