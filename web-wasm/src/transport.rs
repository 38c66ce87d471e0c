//! fetch による Transport 実装

use lingo_common::{ApiError, HttpRequest, HttpResponse, Transport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ブラウザの fetch で送る。ステータスの判定はゲートウェイ側で行う。
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        fetch(&request).await.map_err(network_error)
    }
}

async fn fetch(request: &HttpRequest) -> Result<HttpResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::SameOrigin);
    if let Some(body) = &request.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let js_request = Request::new_with_str_and_init(&request.url, &opts)?;
    for (name, value) in &request.headers {
        js_request.headers().set(name, value)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&js_request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    let body = JsFuture::from(resp.text()?).await?;

    Ok(HttpResponse {
        status: resp.status(),
        status_text: resp.status_text(),
        body: body.as_string().unwrap_or_default(),
    })
}

/// JS 側の例外を通信エラーにする
pub fn network_error(err: JsValue) -> ApiError {
    let message = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err));
    ApiError::Network(message)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_network_error_from_js_error() {
        let err = js_sys::Error::new("Failed to fetch");
        let api = network_error(err.into());
        assert_eq!(api.to_string(), "Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn wasm_network_error_from_string() {
        let api = network_error(JsValue::from_str("offline"));
        assert!(matches!(api, ApiError::Network(ref m) if m == "offline"));
    }
}
