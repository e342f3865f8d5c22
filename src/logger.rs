// 日志初始化 - 同时输出到控制台和按天轮转的日志文件

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::settings::LoggingSettings;

const LOG_FILE_PREFIX: &str = "battery-predictor.log";

/// 系统默认日志目录
pub fn default_log_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join("Library/Logs/battery-predictor")
    } else if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("battery-predictor").join("logs")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local/share/battery-predictor/logs")
    }
}

/// 解析日志级别，无法识别时使用 INFO
pub fn parse_level(level: &str) -> Level {
    level.trim().parse::<Level>().unwrap_or(Level::INFO)
}

/// 初始化日志系统
///
/// 返回的 guard 需要在整个程序生命周期内持有，否则文件日志会丢失
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard> {
    let log_dir = settings
        .directory
        .clone()
        .unwrap_or_else(default_log_dir);
    init_in(&log_dir, parse_level(&settings.level))
}

fn init_in(log_dir: &Path, level: Level) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| anyhow!("无法创建日志目录 {:?}: {}", log_dir, e))?;

    // 配置日志输出到文件（每天轮转）
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
        .map_err(|e| anyhow!("日志文件初始化失败 {:?}: {}", log_dir, e))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let writer = std::io::stdout.and(non_blocking);

    // 使用本地时区
    let timer = LocalTime::new(time::format_description::parse(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]",
    )?);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_timer(timer)
        .with_ansi(cfg!(debug_assertions)) // release 版本不使用颜色代码
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("日志系统初始化失败: {}", e))?;

    eprintln!("日志文件位置: {:?}", log_dir);
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_uncreatable_log_dir_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        // 普通文件下无法创建子目录
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let settings = LoggingSettings {
            level: "info".to_string(),
            directory: Some(blocker.join("logs")),
        };
        let err = init(&settings).err().unwrap();
        assert!(err.to_string().contains("日志目录"));
    }

    #[test]
    fn test_default_log_dir_named_after_app() {
        let dir = default_log_dir();
        assert!(dir.to_string_lossy().contains("battery-predictor"));
    }
}
