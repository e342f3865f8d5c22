// 背景图片 - 启动时读取并编码为 CSS 内联背景

use std::path::Path;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;

/// 已编码的背景图片
#[derive(Debug, Clone)]
pub struct Background {
    mime: &'static str,
    encoded: String,
}

impl Background {
    /// 读取图片文件并转换为base64
    ///
    /// 文件不存在或无法识别图片格式时返回错误
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow!("无法读取背景图片 {:?}: {}", path, e))?;
        Self::from_bytes(&bytes).map_err(|e| anyhow!("背景图片无效 {:?}: {}", path, e))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes)?;
        Ok(Self {
            mime: mime_type(format),
            encoded: general_purpose::STANDARD.encode(bytes),
        })
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.encoded)
    }

    /// 页面背景样式
    pub fn css(&self) -> String {
        format!(
            r#".app {{
    background-image: url("{}");
    background-size: cover;
    background-position: center;
    background-attachment: fixed;
}}"#,
            self.data_url()
        )
    }
}

fn mime_type(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        _ => "application/octet-stream",
    }
}
