use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "BATTERY_PREDICTOR_CONFIG";
/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/settings.json";

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 模型与资源文件路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub scaler_path: PathBuf,
    pub model_path: PathBuf,
    pub background_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("artifacts/scaler.json"),
            model_path: PathBuf::from("artifacts/model.json"),
            background_path: PathBuf::from("images/background.png"),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// 日志级别 (trace/debug/info/warn/error)
    pub level: String,
    /// 日志目录，未设置时使用系统默认位置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// 持久化的应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// 配置管理器
///
/// 启动时读取一次，运行期间只读
pub struct SettingsManager {
    path: PathBuf,
    data: AppSettings,
}

impl SettingsManager {
    /// 配置文件路径（环境变量优先）
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => serde_json::from_slice::<AppSettings>(&bytes)
                .map_err(|e| anyhow!("配置文件格式错误 {:?}: {}", path, e))?,
            _ => {
                let default = AppSettings::default();
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self { path, data })
    }

    pub fn get(&self) -> &AppSettings {
        &self.data
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
