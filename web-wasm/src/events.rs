//! DOM イベントとコントローラの接続
//!
//! 描画される一覧のボタンはクリックの委譲で拾う。固定の入力欄だけ個別に
//! リスナーを付ける。リスナーはページの寿命と同じなので `forget` する。

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use lingo_common::{Dashboard, FilterControl, Page, ReviewFilter, UiAction};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, KeyboardEvent};

use crate::dom::{control_value, query_all, set_class, DomView};
use crate::transport::FetchTransport;

pub type App = Rc<Dashboard<FetchTransport, DomView>>;

/// 操作を非同期に実行する
pub fn spawn(app: &App, action: UiAction) {
    let app = Rc::clone(app);
    spawn_local(async move { app.dispatch(action).await });
}

pub fn bind(app: &App, document: &Document) {
    bind_delegated_clicks(app, document);
    if let Some(root) = document.document_element() {
        bind_navigation(app, &root);
        bind_review_filters(app, &root);
    }
    bind_filter_controls(app, document);
    bind_global_search(app, document);
    bind_buttons(app, document);
}

/// `prevent_default` を呼ぶリスナー用（既定は passive）
fn active() -> EventListenerOptions {
    EventListenerOptions::enable_prevent_default()
}

/// モーダルの背景クリックは閉じる操作になる
fn backdrop_action(target: &Element) -> Option<UiAction> {
    match target.id().as_str() {
        "modal" => Some(UiAction::CloseModal),
        "detailModal" => Some(UiAction::CloseDetail),
        _ => None,
    }
}

fn bind_delegated_clicks(app: &App, document: &Document) {
    let app = Rc::clone(app);
    EventListener::new_with_options(document, "click", active(), move |event| {
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
        else {
            return;
        };
        if let Some(action) = backdrop_action(&target) {
            spawn(&app, action);
            return;
        }
        // 最も内側の data-action が優先（行の中のボタンなど）
        let Ok(Some(actionable)) = target.closest("[data-action]") else {
            return;
        };
        if let Some(action) = UiAction::parse(|name| actionable.get_attribute(name)) {
            if action != UiAction::None {
                event.prevent_default();
                spawn(&app, action);
            }
        }
    })
    .forget();
}

fn bind_navigation(app: &App, root: &Element) {
    for item in query_all(root, ".sidebar-nav li[data-page]") {
        let Some(page) = item.get_attribute("data-page").and_then(|p| Page::parse(&p)) else {
            log::warn!("nav item without a known page");
            continue;
        };
        let app = Rc::clone(app);
        EventListener::new_with_options(&item, "click", active(), move |event| {
            event.prevent_default();
            spawn(&app, UiAction::Navigate(page));
        })
        .forget();
    }
}

fn bind_review_filters(app: &App, root: &Element) {
    let buttons = Rc::new(query_all(root, ".review-filters .filter-btn"));
    for button in buttons.iter() {
        let Some(filter) = button
            .get_attribute("data-filter")
            .and_then(|f| ReviewFilter::parse(&f))
        else {
            continue;
        };
        let app = Rc::clone(app);
        let group = Rc::clone(&buttons);
        let this = button.clone();
        EventListener::new(button, "click", move |_| {
            for other in group.iter() {
                set_class(other, "active", other == &this);
            }
            spawn(&app, UiAction::FilterReview(filter));
        })
        .forget();
    }
}

fn bind_filter_controls(app: &App, document: &Document) {
    let debounce_ms = app.config().debounce_ms;
    for control in FilterControl::ALL {
        let Some(element) = document.get_element_by_id(control.element_id()) else {
            log::debug!("filter control #{} not on page", control.element_id());
            continue;
        };
        let app = Rc::clone(app);
        let source = element.clone();

        if control.is_text() {
            // 新しい入力で前のタイマーを破棄する
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            EventListener::new(&element, "input", move |_| {
                let app = Rc::clone(&app);
                let value = control_value(&source).unwrap_or_default();
                let timeout = Timeout::new(debounce_ms, move || {
                    spawn_local(async move { app.set_filter(control, &value).await });
                });
                pending.borrow_mut().replace(timeout);
            })
            .forget();
        } else {
            EventListener::new(&element, "change", move |_| {
                let app = Rc::clone(&app);
                let value = control_value(&source).unwrap_or_default();
                spawn_local(async move { app.set_filter(control, &value).await });
            })
            .forget();
        }
    }
}

fn bind_global_search(app: &App, document: &Document) {
    let Some(input) = document.get_element_by_id("globalSearch") else {
        return;
    };
    let app = Rc::clone(app);
    let source = input.clone();
    EventListener::new(&input, "keypress", move |event| {
        let is_enter = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Enter");
        if !is_enter {
            return;
        }
        let app = Rc::clone(&app);
        let query = control_value(&source).unwrap_or_default();
        spawn_local(async move { app.perform_search(&query).await });
    })
    .forget();
}

fn bind_buttons(app: &App, document: &Document) {
    let actions = [
        ("quickAddBtn", UiAction::QuickAdd),
        ("detailActionBtn", UiAction::DetailAction),
    ];
    for (id, action) in actions {
        // data-action を持つ場合は委譲側で処理される
        let Some(button) = document.get_element_by_id(id) else {
            continue;
        };
        if button.has_attribute("data-action") {
            continue;
        }
        let app = Rc::clone(app);
        EventListener::new(&button, "click", move |_| spawn(&app, action)).forget();
    }

    if let Some(form) = document.get_element_by_id("modalForm") {
        let app = Rc::clone(app);
        EventListener::new_with_options(&form, "submit", active(), move |event| {
            event.prevent_default();
            spawn(&app, UiAction::SubmitForm);
        })
        .forget();
    }

    if let (Some(toggle), Some(sidebar)) = (
        document.get_element_by_id("sidebarToggle"),
        document.get_element_by_id("sidebar"),
    ) {
        EventListener::new(&toggle, "click", move |_| {
            let collapsed = sidebar.class_list().contains("collapsed");
            set_class(&sidebar, "collapsed", !collapsed);
        })
        .forget();
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_backdrop_only_for_modal_roots() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let modal = doc.create_element("div").unwrap();
        modal.set_id("detailModal");
        assert_eq!(backdrop_action(&modal), Some(UiAction::CloseDetail));

        let inner = doc.create_element("div").unwrap();
        inner.set_id("detailModalBody");
        assert_eq!(backdrop_action(&inner), None);
    }
}
