//! HTTP 命令模块
//!
//! 提供页面和 API 调用的所有命令接口，按功能分组：
//! - predict: 预测命令（页面表单和 JSON 接口）
//! - query: 查询命令（滑块规格、健康检查）

pub mod predict;
pub mod query;

// 重新导出所有命令
pub use predict::*;
pub use query::*;
