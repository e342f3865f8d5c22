// 推理插件接口 - 定义特征缩放器和回归模型的抽象

use crate::models::FeatureVector;

/// 特征缩放器
///
/// 对输入向量做与训练时一致的归一化，输出维度不变
pub trait FeatureScaler: Send + Sync {
    /// 缩放器类型名称（用于日志和健康检查）
    fn kind(&self) -> &'static str;

    fn transform(&self, input: FeatureVector) -> FeatureVector;
}

/// 回归模型
pub trait Regressor: Send + Sync {
    /// 模型类型名称（用于日志和健康检查）
    fn kind(&self) -> &'static str;

    /// 对缩放后的向量做预测，返回续航小时数
    fn predict(&self, scaled: &FeatureVector) -> f64;
}
