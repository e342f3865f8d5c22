// 数据模型模块 - 定义特征向量、滑块规格和风险等级

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 特征数量（模型输入维度）
pub const FEATURE_COUNT: usize = 6;

/// 低于该值判定为高耗电（小时）
pub const HIGH_DRAIN_BELOW: f64 = 5.0;
/// 低于该值判定为中等耗电（小时）
pub const MODERATE_DRAIN_BELOW: f64 = 8.0;

/// 特征向量
///
/// 字段顺序即模型输入顺序，不可调整
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// 屏幕使用时间（小时）
    pub screen_time: f64,
    /// 游戏时间（小时）
    pub gaming_hours: f64,
    /// 屏幕亮度（%）
    pub brightness: f64,
    /// 电池容量（mAh）
    pub battery_capacity: f64,
    /// 后台应用数量
    pub background_apps: f64,
    /// 每日应用使用次数
    pub app_usage: f64,
}

impl FeatureVector {
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [screen_time, gaming_hours, brightness, battery_capacity, background_apps, app_usage] =
            values;
        Self {
            screen_time,
            gaming_hours,
            brightness,
            battery_capacity,
            background_apps,
            app_usage,
        }
    }

    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.screen_time,
            self.gaming_hours,
            self.brightness,
            self.battery_capacity,
            self.background_apps,
            self.app_usage,
        ]
    }

    /// 所有滑块取默认值时的向量
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(FEATURE_SPECS.iter()) {
            *slot = spec.default;
        }
        Self::from_array(values)
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::defaults()
    }
}

/// 单个输入滑块的规格
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSpec {
    /// 表单字段名
    pub key: &'static str,
    /// 显示名称
    pub label: &'static str,
    /// 图标
    pub icon: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// 步长
    pub step: f64,
    /// 是否为整数滑块
    pub integer: bool,
}

impl FeatureSpec {
    /// 按滑块控件的行为修正输入值
    ///
    /// 超出范围的值被截断到边界，整数滑块取整，浮点滑块对齐到步长。
    /// 非有限值回退为默认值。
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }

        let snapped = if self.integer {
            value.round()
        } else {
            // 以最小值为起点对齐步长，再消除浮点误差
            let steps = ((value - self.min) / self.step).round();
            let raw = self.min + steps * self.step;
            (raw * 100.0).round() / 100.0
        };

        snapped.clamp(self.min, self.max)
    }
}

/// 输入滑块规格表（顺序与特征向量一致）
pub const FEATURE_SPECS: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec {
        key: "screen_time",
        label: "Screen Time (hours)",
        icon: "📱",
        min: 1.0,
        max: 15.0,
        default: 6.0,
        step: 0.01,
        integer: false,
    },
    FeatureSpec {
        key: "gaming_hours",
        label: "Gaming Hours",
        icon: "🎮",
        min: 0.0,
        max: 8.0,
        default: 2.0,
        step: 0.01,
        integer: false,
    },
    FeatureSpec {
        key: "brightness",
        label: "Brightness Level (%)",
        icon: "💡",
        min: 20.0,
        max: 100.0,
        default: 60.0,
        step: 0.01,
        integer: false,
    },
    FeatureSpec {
        key: "battery_capacity",
        label: "Battery Capacity (mAh)",
        icon: "🔋",
        min: 2500.0,
        max: 6000.0,
        default: 4000.0,
        step: 0.01,
        integer: false,
    },
    FeatureSpec {
        key: "background_apps",
        label: "Background Apps",
        icon: "📂",
        min: 0.0,
        max: 40.0,
        default: 10.0,
        step: 1.0,
        integer: true,
    },
    FeatureSpec {
        key: "app_usage",
        label: "Daily App Usage Count",
        icon: "📈",
        min: 5.0,
        max: 30.0,
        default: 15.0,
        step: 1.0,
        integer: true,
    },
];

/// 电池风险等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    HighDrain,
    ModerateDrain,
    GoodPerformance,
}

impl RiskTier {
    /// 根据预测续航时间划分等级
    ///
    /// 区间下界闭合：5.0 属于中等，8.0 属于良好。NaN 落入良好。
    pub fn classify(prediction: f64) -> Self {
        if prediction < HIGH_DRAIN_BELOW {
            Self::HighDrain
        } else if prediction < MODERATE_DRAIN_BELOW {
            Self::ModerateDrain
        } else {
            Self::GoodPerformance
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HighDrain => "High Battery Drain",
            Self::ModerateDrain => "Moderate Drain",
            Self::GoodPerformance => "Good Battery Performance",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::HighDrain => "🔴",
            Self::ModerateDrain => "🟡",
            Self::GoodPerformance => "🟢",
        }
    }

    /// 结果文字颜色（CSS）
    pub fn color(&self) -> &'static str {
        match self {
            Self::HighDrain => "red",
            Self::ModerateDrain => "orange",
            Self::GoodPerformance => "lime",
        }
    }
}

/// 单次预测结果
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// 请求ID，用于日志关联
    pub request_id: Uuid,
    /// 预测续航（小时），非有限值序列化为 null
    pub hours: f64,
    /// 保留两位小数的显示值
    pub display_hours: String,
    pub tier: RiskTier,
    pub tier_label: &'static str,
    /// 参与预测的特征向量
    pub inputs: FeatureVector,
    pub computed_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(inputs: FeatureVector, hours: f64) -> Self {
        let tier = RiskTier::classify(hours);
        Self {
            request_id: Uuid::new_v4(),
            hours,
            display_hours: crate::presentation::format_hours(hours),
            tier,
            tier_label: tier.label(),
            inputs,
            computed_at: Utc::now(),
        }
    }
}
