//! リクエストゲートウェイ
//!
//! すべての API 呼び出しが通る唯一の窓口。ヘッダの付与、ビジー表示、
//! 失敗時のトースト表示を一箇所で行い、エラーは呼び出し元へ返す。

use std::cell::Cell;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::error::ApiError;
use crate::view::{ToastKind, View};

/// 失敗トーストのタイトル
pub const FAILURE_TITLE: &str = "请求失败";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// トランスポートへ渡す完成済みリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP の送受信だけを担う。ブラウザでは fetch、テストではモック。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// 呼び出し側が組み立てる API 呼び出し（パスは API ルートからの相対）
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// 既定の JSON ヘッダに呼び出し側のヘッダを重ねる。同名キーは呼び出し側が勝つ。
pub fn merge_headers(caller: &[(String, String)]) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    for (name, value) in caller {
        match headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(existing) => *existing = (name.clone(), value.clone()),
            None => headers.push((name.clone(), value.clone())),
        }
    }
    headers
}

fn decode_body(response: HttpResponse) -> Result<Value, ApiError> {
    if !response.ok() {
        return Err(ApiError::HttpStatus {
            status: response.status,
            status_text: response.status_text,
        });
    }
    // DELETE の 204 などは本文なし
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// 処理中カウンタ。0→1 で表示、1→0 で非表示。
struct BusyGuard<'a, V: View> {
    count: &'a Cell<usize>,
    view: &'a V,
}

impl<'a, V: View> BusyGuard<'a, V> {
    fn enter(count: &'a Cell<usize>, view: &'a V) -> Self {
        let next = count.get() + 1;
        count.set(next);
        if next == 1 {
            view.set_busy(true);
        }
        Self { count, view }
    }
}

impl<V: View> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        let next = self.count.get().saturating_sub(1);
        self.count.set(next);
        if next == 0 {
            self.view.set_busy(false);
        }
    }
}

pub struct Gateway<T> {
    transport: T,
    config: DashboardConfig,
    in_flight: Cell<usize>,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, config: DashboardConfig) -> Self {
        Self {
            transport,
            config,
            in_flight: Cell::new(0),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 実行中のリクエスト数
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// 呼び出しを実行し、本文を `D` として返す。
    /// 失敗時はトーストを出してからエラーを返すので、呼び出し側は重ねて通知しない。
    pub async fn request<D, V>(&self, view: &V, call: ApiCall) -> Result<D, ApiError>
    where
        D: DeserializeOwned,
        V: View,
    {
        let _busy = BusyGuard::enter(&self.in_flight, view);
        let method = call.method;
        let url = self.config.url(&call.path);

        let result = self
            .perform(call)
            .await
            .and_then(|value| serde_json::from_value(value).map_err(ApiError::from));

        if let Err(err) = &result {
            log::warn!("{} {} failed: {}", method, url, err);
            view.show_toast(ToastKind::Error, FAILURE_TITLE, &err.to_string());
        }
        result
    }

    async fn perform(&self, call: ApiCall) -> Result<Value, ApiError> {
        let request = HttpRequest {
            method: call.method,
            url: self.config.url(&call.path),
            headers: merge_headers(&call.headers),
            body: call.body.map(|body| body.to_string()),
        };
        log::debug!("{} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        decode_body(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_headers_default_only() {
        let headers = merge_headers(&[]);
        assert_eq!(
            headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_merge_headers_caller_wins() {
        let caller = vec![
            ("content-type".to_string(), "text/plain".to_string()),
            ("X-CSRFToken".to_string(), "abc".to_string()),
        ];
        let headers = merge_headers(&caller);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0], ("content-type".to_string(), "text/plain".to_string()));
        assert_eq!(headers[1].0, "X-CSRFToken");
    }

    #[test]
    fn test_decode_non_2xx_ignores_body() {
        let response = HttpResponse {
            status: 400,
            status_text: "Bad Request".into(),
            body: r#"{"word": ["This field is required."]}"#.into(),
        };
        let err = decode_body(response).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 400: Bad Request");
    }

    #[test]
    fn test_decode_empty_body_is_null() {
        let response = HttpResponse {
            status: 204,
            status_text: "No Content".into(),
            body: String::new(),
        };
        assert_eq!(decode_body(response).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_malformed_json() {
        let response = HttpResponse {
            status: 200,
            status_text: "OK".into(),
            body: "<html>".into(),
        };
        assert!(matches!(decode_body(response), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_api_call_builder() {
        let call = ApiCall::put("/words/1/")
            .with_body(serde_json::json!({"word": "cat"}))
            .with_header("X-Test", "1");
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.headers.len(), 1);
        assert!(call.body.is_some());
    }
}
