// 推理模块 - 缩放 + 回归的预测流水线

pub mod artifacts;
pub mod plugin;

pub use artifacts::{
    IdentityScaler, LinearRegressor, MinMaxScaler, ModelArtifact, ScalerArtifact, StandardScaler,
};
pub use plugin::{FeatureScaler, Regressor};

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::models::FeatureVector;

/// 预测流水线
///
/// 缩放器和模型在启动时加载，之后只读共享
#[derive(Clone)]
pub struct InferencePipeline {
    scaler: Arc<dyn FeatureScaler>,
    model: Arc<dyn Regressor>,
}

impl InferencePipeline {
    pub fn new(scaler: Arc<dyn FeatureScaler>, model: Arc<dyn Regressor>) -> Self {
        Self { scaler, model }
    }

    /// 从磁盘加载缩放器和模型文件
    pub async fn load(scaler_path: &Path, model_path: &Path) -> Result<Self> {
        let scaler = ScalerArtifact::load(scaler_path).await?;
        info!("缩放器已加载: {:?} ({})", scaler_path, scaler.kind());

        let model = ModelArtifact::load(model_path).await?;
        info!("模型已加载: {:?} ({})", model_path, model.kind());

        Ok(Self::new(Arc::from(scaler), Arc::from(model)))
    }

    /// 执行一次预测（不做输入范围检查）
    pub fn run(&self, input: &FeatureVector) -> f64 {
        let scaled = self.scaler.transform(*input);
        self.model.predict(&scaled)
    }

    pub fn scaler_kind(&self) -> &'static str {
        self.scaler.kind()
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskTier, FEATURE_COUNT};
    use crate::test_support::{stub_pipeline, SumModel};

    #[test]
    fn test_pipeline_deterministic() {
        let pipeline = stub_pipeline();
        let input = FeatureVector::from_array([1.5, 0.25, 20.0, 2500.0, 0.0, 5.0]);

        let first = pipeline.run(&input);
        for _ in 0..10 {
            assert_eq!(pipeline.run(&input), first);
        }
        assert_eq!(first, 2526.75);
    }

    #[test]
    fn test_defaults_end_to_end() {
        let pipeline = stub_pipeline();
        let hours = pipeline.run(&FeatureVector::defaults());
        assert_eq!(hours, 4093.0);
        assert_eq!(RiskTier::classify(hours), RiskTier::GoodPerformance);
    }

    #[test]
    fn test_scaler_applied_before_model() {
        let scaler = StandardScaler::new([6.0, 2.0, 60.0, 4000.0, 10.0, 15.0], [1.0; FEATURE_COUNT]);
        let pipeline = InferencePipeline::new(Arc::new(scaler), Arc::new(SumModel));

        // 默认值标准化后全为0
        let hours = pipeline.run(&FeatureVector::defaults());
        assert_eq!(hours, 0.0);
        assert_eq!(RiskTier::classify(hours), RiskTier::HighDrain);
        assert_eq!(pipeline.scaler_kind(), "standard");
        assert_eq!(pipeline.model_kind(), "sum");
    }

    #[test]
    fn test_out_of_range_inputs_pass_through() {
        let pipeline = stub_pipeline();
        let input = FeatureVector::from_array([-100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(pipeline.run(&input), -100.0);
    }
}
