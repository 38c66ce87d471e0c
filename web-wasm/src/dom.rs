//! ブラウザ DOM に対する `View` 実装

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use gloo::timers::callback::Timeout;
use leptos::mount::{mount_to, mount_to_body};
use leptos::prelude::*;
use lingo_common::chart::ChartConfig;
use lingo_common::form::FormTemplate;
use lingo_common::render;
use lingo_common::{ChartCanvas, ChartHandle, Counter, Page, Region, ToastKind, View};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::chart_js::{self, Chart};
use crate::components::{LoadingOverlay, ToastEntry, Toasts};

const MODAL: &str = "modal";
const MODAL_TITLE: &str = "modalTitle";
const MODAL_FORM: &str = "modalForm";
const DETAIL_MODAL: &str = "detailModal";
const DETAIL_TITLE: &str = "detailModalTitle";
const PAGE_TITLE: &str = "pageTitle";
const TOAST_CONTAINER: &str = "toastContainer";

pub struct DomView {
    document: Document,
    toasts: RwSignal<Vec<ToastEntry>>,
    busy: RwSignal<bool>,
    toast_ms: u32,
    next_toast: Cell<u64>,
    charts: RefCell<HashMap<u32, Chart>>,
    next_chart: Cell<u32>,
}

impl DomView {
    /// トーストとオーバーレイをマウントしてビューを作る
    pub fn mount(document: Document, toast_ms: u32) -> Self {
        let toasts = RwSignal::new(Vec::new());
        let busy = RwSignal::new(false);

        match document
            .get_element_by_id(TOAST_CONTAINER)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(container) => {
                mount_to(container, move || view! { <Toasts toasts=toasts/> }).forget();
            }
            None => log::warn!("#{} not found, toasts are disabled", TOAST_CONTAINER),
        }
        let overlay = busy.read_only();
        mount_to_body(move || view! { <LoadingOverlay busy=overlay/> });

        Self::new(document, toasts, busy, toast_ms)
    }

    fn new(
        document: Document,
        toasts: RwSignal<Vec<ToastEntry>>,
        busy: RwSignal<bool>,
        toast_ms: u32,
    ) -> Self {
        Self {
            document,
            toasts,
            busy,
            toast_ms,
            next_toast: Cell::new(0),
            charts: RefCell::new(HashMap::new()),
            next_chart: Cell::new(0),
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let found = self.document.get_element_by_id(id);
        if found.is_none() {
            log::debug!("element #{} not found", id);
        }
        found
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_active(&self, id: &str, active: bool) {
        if let Some(el) = self.element(id) {
            set_class(&el, "active", active);
        }
    }
}

/// セレクタに一致する要素を列挙する
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("invalid selector: {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::warn!("classList.toggle({}) failed: {:?}", class, err);
    }
}

/// input / select / textarea の現在値
pub fn control_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    el.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}

impl View for DomView {
    fn activate_page(&self, page: Page) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        for item in query_all(&root, ".sidebar-nav li[data-page]") {
            let selected = item.get_attribute("data-page").as_deref() == Some(page.key());
            set_class(&item, "active", selected);
        }
        for section in query_all(&root, ".page") {
            set_class(&section, "active", section.id() == page.key());
        }
    }

    fn set_title(&self, title: &str) {
        self.set_text(PAGE_TITLE, title);
    }

    fn set_html(&self, region: Region, html: String) {
        if let Some(el) = self.element(region.element_id()) {
            el.set_inner_html(&html);
        }
    }

    fn set_counter(&self, counter: Counter, value: u64) {
        self.set_text(counter.element_id(), &value.to_string());
    }

    fn show_toast(&self, kind: ToastKind, title: &str, message: &str) {
        let id = self.next_toast.get() + 1;
        self.next_toast.set(id);
        self.toasts.update(|list| {
            list.push(ToastEntry {
                id,
                kind,
                title: title.to_string(),
                message: message.to_string(),
            })
        });

        let toasts = self.toasts;
        Timeout::new(self.toast_ms, move || {
            toasts.update(|list| list.retain(|toast| toast.id != id));
        })
        .forget();
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn show_form(&self, title: &str, template: &FormTemplate) {
        self.set_text(MODAL_TITLE, title);
        if let Some(form) = self.element(MODAL_FORM) {
            form.set_inner_html(&render::form_fields(template));
        }
        self.set_active(MODAL, true);
    }

    fn read_form(&self) -> Vec<(String, String)> {
        let Some(form) = self.element(MODAL_FORM) else {
            return Vec::new();
        };
        query_all(&form, "[name]")
            .iter()
            .filter_map(|el| {
                let name = el.get_attribute("name")?;
                Some((name, control_value(el)?))
            })
            .collect()
    }

    fn close_form(&self) {
        self.set_active(MODAL, false);
    }

    fn show_detail(&self, title: &str, body: String) {
        self.set_text(DETAIL_TITLE, title);
        self.set_html(Region::DetailBody, body);
        self.set_active(DETAIL_MODAL, true);
    }

    fn close_detail(&self) {
        self.set_active(DETAIL_MODAL, false);
    }

    fn draw_chart(&self, canvas: ChartCanvas, config: &ChartConfig) -> Option<ChartHandle> {
        let element = self
            .element(canvas.element_id())?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        match chart_js::create(&element, config) {
            Ok(chart) => {
                let id = self.next_chart.get() + 1;
                self.next_chart.set(id);
                self.charts.borrow_mut().insert(id, chart);
                Some(ChartHandle(id))
            }
            Err(err) => {
                log::error!("chart #{} failed: {:?}", canvas.element_id(), err);
                None
            }
        }
    }

    fn destroy_chart(&self, handle: ChartHandle) {
        let removed = self.charts.borrow_mut().remove(&handle.0);
        if let Some(chart) = removed {
            chart.destroy();
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use lingo_common::types::EntityKind;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn fixture(html: &str) -> (Document, Element) {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        root.set_inner_html(html);
        doc.body().unwrap().append_child(&root).unwrap();
        (doc, root)
    }

    fn view(doc: Document) -> DomView {
        DomView::new(doc, RwSignal::new(Vec::new()), RwSignal::new(false), 3000)
    }

    #[wasm_bindgen_test]
    fn wasm_activate_page_moves_active_class() {
        let (doc, root) = fixture(
            r#"<ul class="sidebar-nav"><li data-page="dashboard" class="active"></li><li data-page="words"></li></ul>
               <section id="dashboard" class="page active"></section><section id="words" class="page"></section>"#,
        );
        view(doc.clone()).activate_page(Page::Words);
        let words = doc.get_element_by_id("words").unwrap();
        assert!(words.class_list().contains("active"));
        assert!(!doc.get_element_by_id("dashboard").unwrap().class_list().contains("active"));
        root.remove();
    }

    #[wasm_bindgen_test]
    fn wasm_form_round_trip() {
        let (doc, root) = fixture(
            r#"<div id="modal" class="modal"><h3 id="modalTitle"></h3><form id="modalForm"></form></div>"#,
        );
        let view = view(doc.clone());
        view.show_form("添加语法", &FormTemplate::empty(EntityKind::Grammar));
        assert!(doc.get_element_by_id("modal").unwrap().class_list().contains("active"));

        let pairs = view.read_form();
        assert!(pairs.iter().any(|(name, _)| name == "title"));
        assert!(pairs.iter().any(|(name, value)| name == "difficulty" && !value.is_empty()));

        view.close_form();
        assert!(!doc.get_element_by_id("modal").unwrap().class_list().contains("active"));
        root.remove();
    }

    #[wasm_bindgen_test]
    fn wasm_counters_use_text_content() {
        let (doc, root) = fixture(r#"<span id="reviewBadge"></span>"#);
        view(doc.clone()).set_counter(Counter::ReviewBadge, 17);
        assert_eq!(
            doc.get_element_by_id("reviewBadge").unwrap().text_content().as_deref(),
            Some("17")
        );
        root.remove();
    }
}
