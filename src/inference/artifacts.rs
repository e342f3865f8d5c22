// 模型文件 - 从 JSON 加载已拟合的缩放器和回归模型

use std::path::Path;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use super::plugin::{FeatureScaler, Regressor};
use crate::models::{FeatureVector, FEATURE_COUNT};

/// 缩放器文件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// 标准化: (x - mean) / scale
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// 区间缩放: x * scale + min
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    /// 不做变换
    Identity,
}

/// 回归模型文件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// 线性回归: intercept + Σ coefficient_i * x_i
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

/// 标准化缩放器
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        // 常量特征的方差为0，按1处理
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Self { mean, scale }
    }
}

impl FeatureScaler for StandardScaler {
    fn kind(&self) -> &'static str {
        "standard"
    }

    fn transform(&self, input: FeatureVector) -> FeatureVector {
        let mut values = input.as_array();
        for (i, value) in values.iter_mut().enumerate() {
            *value = (*value - self.mean[i]) / self.scale[i];
        }
        FeatureVector::from_array(values)
    }
}

/// 区间缩放器
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl MinMaxScaler {
    pub fn new(min: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        Self { min, scale }
    }
}

impl FeatureScaler for MinMaxScaler {
    fn kind(&self) -> &'static str {
        "min_max"
    }

    fn transform(&self, input: FeatureVector) -> FeatureVector {
        let mut values = input.as_array();
        for (i, value) in values.iter_mut().enumerate() {
            *value = *value * self.scale[i] + self.min[i];
        }
        FeatureVector::from_array(values)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl FeatureScaler for IdentityScaler {
    fn kind(&self) -> &'static str {
        "identity"
    }

    fn transform(&self, input: FeatureVector) -> FeatureVector {
        input
    }
}

/// 线性回归模型
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn predict(&self, scaled: &FeatureVector) -> f64 {
        scaled
            .as_array()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, w)| acc + x * w)
    }
}

impl ScalerArtifact {
    /// 读取并校验缩放器文件
    pub async fn load(path: &Path) -> Result<Box<dyn FeatureScaler>> {
        let artifact: ScalerArtifact = read_json(path, "缩放器").await?;
        artifact
            .into_scaler()
            .map_err(|e| anyhow!("缩放器文件无效 {:?}: {}", path, e))
    }

    pub fn into_scaler(self) -> Result<Box<dyn FeatureScaler>> {
        let scaler: Box<dyn FeatureScaler> = match self {
            Self::Standard { mean, scale } => Box::new(StandardScaler::new(
                fixed_params("mean", &mean)?,
                fixed_params("scale", &scale)?,
            )),
            Self::MinMax { min, scale } => Box::new(MinMaxScaler::new(
                fixed_params("min", &min)?,
                fixed_params("scale", &scale)?,
            )),
            Self::Identity => Box::new(IdentityScaler),
        };
        Ok(scaler)
    }
}

impl ModelArtifact {
    /// 读取并校验模型文件
    pub async fn load(path: &Path) -> Result<Box<dyn Regressor>> {
        let artifact: ModelArtifact = read_json(path, "模型").await?;
        artifact
            .into_regressor()
            .map_err(|e| anyhow!("模型文件无效 {:?}: {}", path, e))
    }

    pub fn into_regressor(self) -> Result<Box<dyn Regressor>> {
        match self {
            Self::Linear {
                coefficients,
                intercept,
            } => {
                if !intercept.is_finite() {
                    bail!("intercept 不是有限数值");
                }
                Ok(Box::new(LinearRegressor::new(
                    fixed_params("coefficients", &coefficients)?,
                    intercept,
                )))
            }
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow!("无法读取{}文件 {:?}: {}", what, path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| anyhow!("{}文件格式错误 {:?}: {}", what, path, e))
}

/// 校验参数维度和数值
fn fixed_params(name: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT]> {
    let params: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        anyhow!(
            "{} 维度错误: 期望 {}, 实际 {}",
            name,
            FEATURE_COUNT,
            values.len()
        )
    })?;
    if let Some(index) = params.iter().position(|v| !v.is_finite()) {
        bail!("{}[{}] 不是有限数值", name, index);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_standard_scaler_transform() {
        let scaler = StandardScaler::new(
            [6.0, 2.0, 60.0, 4000.0, 10.0, 15.0],
            [2.0, 1.0, 20.0, 500.0, 5.0, 0.0],
        );
        let scaled = scaler.transform(FeatureVector::from_array([
            8.0, 2.0, 40.0, 5000.0, 20.0, 18.0,
        ]));
        // 最后一维 scale 为0，按1处理
        assert_eq!(scaled.as_array(), [1.0, 0.0, -1.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn test_min_max_scaler_transform() {
        let scaler = MinMaxScaler::new([0.0, -1.0, 0.0, 0.0, 0.0, 0.0], [0.5; FEATURE_COUNT]);
        let scaled = scaler.transform(FeatureVector::from_array([2.0; FEATURE_COUNT]));
        assert_eq!(scaled.as_array(), [1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_linear_regressor_predict() {
        let model = LinearRegressor::new([1.0, -0.5, 0.0, 0.001, 0.0, 0.0], 3.0);
        let hours = model.predict(&FeatureVector::from_array([
            6.0, 2.0, 60.0, 4000.0, 10.0, 15.0,
        ]));
        assert!((hours - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_artifact_deserialization() {
        let scaler: ScalerArtifact = serde_json::from_value(json!({
            "kind": "standard",
            "mean": [0, 0, 0, 0, 0, 0],
            "scale": [1, 1, 1, 1, 1, 1]
        }))
        .unwrap();
        assert_eq!(scaler.into_scaler().unwrap().kind(), "standard");

        let identity: ScalerArtifact = serde_json::from_value(json!({ "kind": "identity" })).unwrap();
        assert_eq!(identity.into_scaler().unwrap().kind(), "identity");

        let model: ModelArtifact = serde_json::from_value(json!({
            "kind": "linear",
            "coefficients": [1, 1, 1, 1, 1, 1],
            "intercept": 0.5
        }))
        .unwrap();
        assert_eq!(model.into_regressor().unwrap().kind(), "linear");
    }

    #[test]
    fn test_wrong_dimension_rejected() {
        let scaler = ScalerArtifact::Standard {
            mean: vec![0.0; 5],
            scale: vec![1.0; 6],
        };
        let err = scaler.into_scaler().err().unwrap();
        assert!(err.to_string().contains("mean"));

        let model = ModelArtifact::Linear {
            coefficients: vec![1.0; 7],
            intercept: 0.0,
        };
        assert!(model.into_regressor().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let scaler = ScalerArtifact::MinMax {
            min: vec![0.0; 6],
            scale: vec![1.0, 1.0, f64::INFINITY, 1.0, 1.0, 1.0],
        };
        assert!(scaler.into_scaler().is_err());

        let model = ModelArtifact::Linear {
            coefficients: vec![1.0; 6],
            intercept: f64::NAN,
        };
        assert!(model.into_regressor().is_err());
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("model.json");
        tokio::fs::write(
            &path,
            r#"{"kind":"linear","coefficients":[0,0,0,0,0,0],"intercept":7.5}"#,
        )
        .await
        .unwrap();

        let model = ModelArtifact::load(&path).await.unwrap();
        assert_eq!(model.predict(&FeatureVector::defaults()), 7.5);
    }

    #[tokio::test]
    async fn test_load_missing_or_malformed() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(ScalerArtifact::load(&missing).await.is_err());

        let broken = temp_dir.path().join("broken.json");
        tokio::fs::write(&broken, b"\x80\x04pickle").await.unwrap();
        assert!(ModelArtifact::load(&broken).await.is_err());
    }
}
