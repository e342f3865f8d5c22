//! 预测命令
//!
//! - 页面表单提交：按滑块规则收集输入后预测
//! - JSON 接口：直接使用请求中的特征向量，不做范围修正

use axum::extract::State;
use axum::response::Html;
use axum::{Form, Json};
use tracing::info;

use crate::collector::{self, SliderForm};
use crate::models::{FeatureVector, Prediction};
use crate::presentation;
use crate::AppState;

/// 执行一次预测并记录日志
pub fn predict(state: &AppState, inputs: FeatureVector) -> Prediction {
    let hours = state.context.pipeline().run(&inputs);
    let prediction = Prediction::new(inputs, hours);
    info!(
        request_id = %prediction.request_id,
        "预测完成: {} 小时, {}",
        prediction.display_hours,
        prediction.tier.label()
    );
    prediction
}

/// 初始页面（默认滑块值，无结果）
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(presentation::render_page(
        state.context.background(),
        &FeatureVector::defaults(),
        None,
    ))
}

/// 表单提交预测
pub async fn predict_form(
    State(state): State<AppState>,
    Form(form): Form<SliderForm>,
) -> Html<String> {
    let inputs = collector::collect(&form);
    let prediction = predict(&state, inputs);
    Html(presentation::render_page(
        state.context.background(),
        &inputs,
        Some(&prediction),
    ))
}

/// JSON 预测接口
pub async fn predict_api(
    State(state): State<AppState>,
    Json(inputs): Json<FeatureVector>,
) -> Json<Prediction> {
    Json(predict(&state, inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTier;
    use crate::test_support::stub_state;

    #[tokio::test]
    async fn test_index_is_idle() {
        let Html(page) = index(State(stub_state())).await;
        assert!(page.contains("Predict Battery Life"));
        assert!(!page.contains("Estimated Battery Life"));
    }

    #[tokio::test]
    async fn test_form_defaults_end_to_end() {
        let Html(page) = predict_form(State(stub_state()), Form(SliderForm::default())).await;
        // 求和模型: 6 + 2 + 60 + 4000 + 10 + 15
        assert!(page.contains("4093.00 Hours"));
        assert!(page.contains("Good Battery Performance"));
    }

    #[tokio::test]
    async fn test_form_values_clamped() {
        let form = SliderForm {
            screen_time: Some(100.0),
            gaming_hours: Some(0.0),
            brightness: Some(20.0),
            battery_capacity: Some(0.0),
            background_apps: Some(0.0),
            app_usage: Some(5.0),
        };
        let Html(page) = predict_form(State(stub_state()), Form(form)).await;
        // 15 + 0 + 20 + 2500 + 0 + 5
        assert!(page.contains("2540.00 Hours"));
        assert!(page.contains(r#"name="screen_time" min="1" max="15" step="0.01" value="15.00""#));
    }

    #[tokio::test]
    async fn test_api_does_not_clamp() {
        let inputs = FeatureVector::from_array([0.0, 0.0, 0.0, 1.0, 0.0, 2.5]);
        let Json(prediction) = predict_api(State(stub_state()), Json(inputs)).await;
        assert_eq!(prediction.hours, 3.5);
        assert_eq!(prediction.display_hours, "3.50");
        assert_eq!(prediction.tier, RiskTier::HighDrain);
        assert_eq!(prediction.inputs, inputs);
    }

    #[tokio::test]
    async fn test_api_tier_boundaries() {
        let state = stub_state();
        for (hours, tier) in [
            (4.99, RiskTier::HighDrain),
            (5.0, RiskTier::ModerateDrain),
            (7.99, RiskTier::ModerateDrain),
            (8.0, RiskTier::GoodPerformance),
        ] {
            let inputs = FeatureVector::from_array([hours, 0.0, 0.0, 0.0, 0.0, 0.0]);
            assert_eq!(predict(&state, inputs).tier, tier, "{}", hours);
        }
    }
}
