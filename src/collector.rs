//! 输入收集
//!
//! 将表单提交的滑块值整理为固定顺序的特征向量

use serde::{Deserialize, Deserializer};

use crate::models::{FeatureVector, FEATURE_COUNT, FEATURE_SPECS};

/// 表单提交的原始滑块值
///
/// 缺失或无法解析的字段取滑块默认值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SliderForm {
    #[serde(default, deserialize_with = "lenient_number")]
    pub screen_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gaming_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub brightness: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub battery_capacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub background_apps: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub app_usage: Option<f64>,
}

impl SliderForm {
    fn values(&self) -> [Option<f64>; FEATURE_COUNT] {
        [
            self.screen_time,
            self.gaming_hours,
            self.brightness,
            self.battery_capacity,
            self.background_apps,
            self.app_usage,
        ]
    }
}

impl From<FeatureVector> for SliderForm {
    fn from(vector: FeatureVector) -> Self {
        let [screen_time, gaming_hours, brightness, battery_capacity, background_apps, app_usage] =
            vector.as_array().map(Some);
        Self {
            screen_time,
            gaming_hours,
            brightness,
            battery_capacity,
            background_apps,
            app_usage,
        }
    }
}

/// 按滑块规则收集特征向量
pub fn collect(form: &SliderForm) -> FeatureVector {
    let mut values = [0.0; FEATURE_COUNT];
    for ((slot, spec), raw) in values
        .iter_mut()
        .zip(FEATURE_SPECS.iter())
        .zip(form.values())
    {
        *slot = raw.map_or(spec.default, |value| spec.clamp(value));
    }
    FeatureVector::from_array(values)
}

/// 表单字段均为字符串，解析失败时视为缺失
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|text| text.trim().parse::<f64>().ok()))
}
