//! Lingo 学習ダッシュボード (Leptos + WASM)
//!
//! ホストページのマークアップに対して、状態とAPI呼び出しは `lingo-common`
//! のコントローラ、DOM 操作は [`dom::DomView`] が担当する。

mod chart_js;
mod components;
mod config;
mod dom;
mod events;
mod logger;
mod transport;

use std::rc::Rc;

use lingo_common::Dashboard;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom::DomView;
use crate::events::App;
use crate::transport::FetchTransport;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let (config, problem) = config::load(&document);
    logger::init(config.log_level());
    if let Some(err) = problem {
        log::warn!("falling back to default config: {}", err);
    }
    log::info!("lingo dashboard starting (api: {})", config.api_root);

    let view = DomView::mount(document.clone(), config.toast_ms);
    let app: App = Rc::new(Dashboard::new(FetchTransport, view, config));
    events::bind(&app, &document);

    spawn_local(async move { app.start().await });
}
