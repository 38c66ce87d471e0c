//! Lingo Common Library
//!
//! 学習ダッシュボードの状態管理・API 呼び出し・描画。
//! DOM と HTTP には `View` / `Transport` 越しにしか触れないので、
//! ネイティブでテストでき、ブラウザ側（lingo-web）はその実装だけを持つ。

pub mod action;
pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod gateway;
pub mod page;
pub mod query;
pub mod render;
pub mod store;
pub mod types;
pub mod view;

pub use action::UiAction;
pub use config::DashboardConfig;
pub use controller::Dashboard;
pub use error::{ApiError, Error, FormError, Result};
pub use gateway::{ApiCall, Gateway, HttpRequest, HttpResponse, Method, Transport};
pub use page::Page;
pub use query::FilterControl;
pub use store::{ReviewFilter, Store};
pub use types::EntityKind;
pub use view::{ChartCanvas, ChartHandle, Counter, Region, ToastKind, View};
