//! 結合テスト用のモック
//!
//! `MockTransport` は積まれた応答を順に返し、送られたリクエストを記録する。
//! `RecordingView` は View への呼び出しをすべて記録する。

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use lingo_common::chart::ChartConfig;
use lingo_common::form::FormTemplate;
use lingo_common::{
    ApiError, ChartCanvas, ChartHandle, Counter, Dashboard, DashboardConfig, HttpRequest,
    HttpResponse, Page, Region, ToastKind, Transport, View,
};
use serde_json::Value;

/// 1回だけ Pending を返して他のタスクに順番を譲る
#[derive(Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

struct Reply {
    result: Result<HttpResponse, String>,
    yields: usize,
}

#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<HttpRequest>>,
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

impl MockTransport {
    pub fn reply(&self, status: u16, body: &str) {
        self.reply_delayed(0, status, body);
    }

    pub fn reply_json(&self, body: Value) {
        self.reply(200, &body.to_string());
    }

    /// `yields` 回ほかのタスクに譲ってから応答する
    pub fn reply_delayed(&self, yields: usize, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Reply {
            result: Ok(HttpResponse {
                status,
                status_text: status_text(status).to_string(),
                body: body.to_string(),
            }),
            yields,
        });
    }

    pub fn fail(&self, message: &str) {
        self.replies.borrow_mut().push_back(Reply {
            result: Err(message.to_string()),
            yields: 0,
        });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// "GET /api/words/?page=1" 形式の一覧
    pub fn calls(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        let Some(reply) = reply else {
            return Err(ApiError::Network("no reply queued".into()));
        };
        for _ in 0..reply.yields {
            YieldNow::default().await;
        }
        reply.result.map_err(ApiError::Network)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Activate(Page),
    Title(String),
    Html(Region, String),
    Counter(Counter, u64),
    Toast(ToastKind, String, String),
    Busy(bool),
    Confirm(String),
    ShowForm(String),
    CloseForm,
    ShowDetail(String, String),
    CloseDetail,
    DrawChart(ChartCanvas, ChartHandle),
    DestroyChart(ChartHandle),
}

pub struct RecordingView {
    events: RefCell<Vec<Event>>,
    confirm_answer: Cell<bool>,
    form: RefCell<Vec<(String, String)>>,
    next_chart: Cell<u32>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
            form: RefCell::new(Vec::new()),
            next_chart: Cell::new(1),
        }
    }
}

impl RecordingView {
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    /// ユーザーがフォームに入力した状態にする
    pub fn fill_form(&self, values: &[(&str, &str)]) {
        *self.form.borrow_mut() = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
    }

    pub fn set_form_value(&self, name: &str, value: &str) {
        let mut form = self.form.borrow_mut();
        match form.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => form.push((name.to_string(), value.to_string())),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn html(&self, region: Region) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Html(r, html) if *r == region => Some(html.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_html(&self, region: Region) -> Option<String> {
        self.html(region).pop()
    }

    pub fn counter(&self, counter: Counter) -> Option<u64> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Event::Counter(c, value) if *c == counter => Some(*value),
            _ => None,
        })
    }

    pub fn toasts(&self) -> Vec<(ToastKind, String, String)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Toast(kind, title, message) => Some((*kind, title.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn busy(&self) -> Vec<bool> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Busy(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl View for RecordingView {
    fn activate_page(&self, page: Page) {
        self.push(Event::Activate(page));
    }

    fn set_title(&self, title: &str) {
        self.push(Event::Title(title.to_string()));
    }

    fn set_html(&self, region: Region, html: String) {
        self.push(Event::Html(region, html));
    }

    fn set_counter(&self, counter: Counter, value: u64) {
        self.push(Event::Counter(counter, value));
    }

    fn show_toast(&self, kind: ToastKind, title: &str, message: &str) {
        self.push(Event::Toast(kind, title.to_string(), message.to_string()));
    }

    fn set_busy(&self, busy: bool) {
        self.push(Event::Busy(busy));
    }

    fn confirm(&self, message: &str) -> bool {
        self.push(Event::Confirm(message.to_string()));
        self.confirm_answer.get()
    }

    fn show_form(&self, title: &str, template: &FormTemplate) {
        // DOM と同じく、表示した値がそのまま入力欄の値になる
        *self.form.borrow_mut() = template.pairs();
        self.push(Event::ShowForm(title.to_string()));
    }

    fn read_form(&self) -> Vec<(String, String)> {
        self.form.borrow().clone()
    }

    fn close_form(&self) {
        self.push(Event::CloseForm);
    }

    fn show_detail(&self, title: &str, body: String) {
        self.push(Event::ShowDetail(title.to_string(), body));
    }

    fn close_detail(&self) {
        self.push(Event::CloseDetail);
    }

    fn draw_chart(&self, canvas: ChartCanvas, _config: &ChartConfig) -> Option<ChartHandle> {
        let handle = ChartHandle(self.next_chart.get());
        self.next_chart.set(handle.0 + 1);
        self.push(Event::DrawChart(canvas, handle));
        Some(handle)
    }

    fn destroy_chart(&self, handle: ChartHandle) {
        self.push(Event::DestroyChart(handle));
    }
}

pub type TestDashboard = Dashboard<MockTransport, RecordingView>;

pub fn dashboard() -> TestDashboard {
    Dashboard::new(
        MockTransport::default(),
        RecordingView::default(),
        DashboardConfig::default(),
    )
}

pub fn transport(dashboard: &TestDashboard) -> &MockTransport {
    dashboard.gateway().transport()
}
