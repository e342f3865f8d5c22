// 运行上下文 - 启动时一次性加载的只读资源

use anyhow::Result;
use tracing::info;

use crate::background::Background;
use crate::inference::InferencePipeline;
use crate::settings::ArtifactPaths;

/// 只读运行上下文
///
/// 在启动时构建，任一文件缺失或损坏即失败，之后在所有请求间共享
pub struct ArtifactContext {
    pipeline: InferencePipeline,
    background: Background,
}

impl ArtifactContext {
    pub fn new(pipeline: InferencePipeline, background: Background) -> Self {
        Self {
            pipeline,
            background,
        }
    }

    /// 加载缩放器、模型和背景图片
    pub async fn load(paths: &ArtifactPaths) -> Result<Self> {
        let background = Background::load(&paths.background_path).await?;
        info!(
            "背景图片已加载: {:?} ({})",
            paths.background_path,
            background.mime()
        );

        let pipeline = InferencePipeline::load(&paths.scaler_path, &paths.model_path).await?;

        Ok(Self::new(pipeline, background))
    }

    pub fn pipeline(&self) -> &InferencePipeline {
        &self.pipeline
    }

    pub fn background(&self) -> &Background {
        &self.background
    }
}
