// 测试辅助 - 恒等缩放器 + 求和模型的桩实现

use std::sync::Arc;

use crate::background::Background;
use crate::context::ArtifactContext;
use crate::inference::{IdentityScaler, InferencePipeline, Regressor};
use crate::models::FeatureVector;
use crate::AppState;

/// 对所有输入求和的测试模型
pub(crate) struct SumModel;

impl Regressor for SumModel {
    fn kind(&self) -> &'static str {
        "sum"
    }

    fn predict(&self, scaled: &FeatureVector) -> f64 {
        scaled.as_array().iter().sum()
    }
}

pub(crate) fn stub_pipeline() -> InferencePipeline {
    InferencePipeline::new(Arc::new(IdentityScaler), Arc::new(SumModel))
}

pub(crate) fn stub_background() -> Background {
    Background::from_bytes(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap()
}

pub(crate) fn stub_state() -> AppState {
    AppState::new(ArtifactContext::new(stub_pipeline(), stub_background()))
}
