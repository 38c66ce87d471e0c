//! Chart.js バインディング
//!
//! ホストページが読み込むグローバルの `Chart` を使う。

use lingo_common::chart::ChartConfig;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    pub fn destroy(this: &Chart);
}

/// 設定をプレーンな JS オブジェクトにしてチャートを作る
pub fn create(canvas: &HtmlCanvasElement, config: &ChartConfig) -> Result<Chart, JsValue> {
    let config = to_js(config)?;
    Chart::new(canvas, &config)
}

fn to_js(config: &ChartConfig) -> Result<JsValue, JsValue> {
    // Map ではなく Object で渡す（Chart.js は Map を読まない）
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(config.serialize(&serializer)?)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use lingo_common::chart::build_charts;
    use lingo_common::types::Statistics;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_config_is_plain_object() {
        let charts = build_charts(&Statistics::default());
        let value = to_js(&charts[3].1).unwrap();
        let chart_type = js_sys::Reflect::get(&value, &JsValue::from_str("type")).unwrap();
        assert_eq!(chart_type.as_string().as_deref(), Some("line"));
        let options = js_sys::Reflect::get(&value, &JsValue::from_str("options")).unwrap();
        assert!(options.is_object());
        assert!(!options.is_instance_of::<js_sys::Map>());
    }
}
