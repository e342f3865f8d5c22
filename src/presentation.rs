//! 页面渲染
//!
//! 负责预测结果的格式化和单页界面的 HTML 输出

use crate::background::Background;
use crate::models::{FeatureVector, Prediction, FEATURE_SPECS};

/// 页面标题
pub const PAGE_TITLE: &str = "Mobile Battery Life Predictor";

const PAGE_STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", sans-serif; }
.app { display: flex; min-height: 100vh; }
.sidebar { width: 320px; padding: 24px; background-color: rgba(240, 242, 246, 0.92); }
.sidebar h2 { margin-top: 0; }
.slider { margin-bottom: 18px; }
.slider label { display: block; font-weight: 600; margin-bottom: 4px; }
.slider input[type=range] { width: 100%; }
.slider output { float: right; font-variant-numeric: tabular-nums; }
.main { flex: 1; padding: 32px; }
.main-title { font-size: 35px; font-weight: bold; text-align: center; color: white; }
.predict-button { padding: 10px 20px; font-size: 16px; border-radius: 8px; cursor: pointer; }
.prediction-box {
    padding: 20px;
    border-radius: 15px;
    background-color: rgba(0, 0, 0, 0.6);
    color: white;
    text-align: center;
    font-size: 22px;
    font-weight: bold;
}
.prediction-value { font-size: 30px; }
.footer { margin-top: 48px; color: #ddd; font-size: 14px; }
"#;

/// 预测值保留两位小数
///
/// 非有限值原样输出
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// 预测结果框
pub fn render_result(prediction: &Prediction) -> String {
    format!(
        r#"<div class="prediction-box">
🔋 Estimated Battery Life: <br><br>
<span class="prediction-value" style="color:{color};">{hours} Hours</span>
<br><br>
{marker} {label}
</div>"#,
        color = prediction.tier.color(),
        hours = escape_html(&prediction.display_hours),
        marker = prediction.tier.marker(),
        label = escape_html(prediction.tier.label()),
    )
}

/// 侧边栏滑块
fn render_sliders(values: &FeatureVector) -> String {
    FEATURE_SPECS
        .iter()
        .zip(values.as_array())
        .map(|(spec, value)| {
            let value = format_slider_value(value, spec.integer);
            format!(
                r#"<div class="slider">
<label for="{key}">{icon} {label} <output id="{key}-value">{value}</output></label>
<input type="range" id="{key}" name="{key}" min="{min}" max="{max}" step="{step}" value="{value}" oninput="document.getElementById('{key}-value').value = this.value">
</div>"#,
                key = spec.key,
                icon = spec.icon,
                label = escape_html(spec.label),
                min = spec.min,
                max = spec.max,
                step = spec.step,
                value = value,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_slider_value(value: f64, integer: bool) -> String {
    if integer {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// 完整页面
///
/// `prediction` 为空时为初始状态，只显示输入表单
pub fn render_page(
    background: &Background,
    values: &FeatureVector,
    prediction: Option<&Prediction>,
) -> String {
    let result = prediction.map(render_result).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🔋</text></svg>">
<style>{style}
{background}
</style>
</head>
<body>
<form class="app" method="post" action="/predict">
<aside class="sidebar">
<h2>📊 Input Features</h2>
{sliders}
</aside>
<main class="main">
<p class="main-title">🔋 {title}</p>
<button type="submit" class="predict-button">🔍 Predict Battery Life</button>
<div class="result">{result}</div>
<hr>
<p class="footer">Built with ❤️ in Rust</p>
</main>
</form>
</body>
</html>
"#,
        title = PAGE_TITLE,
        style = PAGE_STYLE,
        background = background.css(),
        sliders = render_sliders(values),
        result = result,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
