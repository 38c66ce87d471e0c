//! ダッシュボードのコントローラ
//!
//! 画面操作を受けて API を呼び、ストアを更新し、描画結果を `View` へ渡す。
//! すべてのメソッドは `&self` を取り、ストアは `RefCell` で保持する。
//! `.await` をまたいでストアを借用しないこと。
//!
//! 失敗はゲートウェイがトーストで通知済みなので、ここではログに残して
//! 直前の表示をそのまま残す。

use std::cell::{Ref, RefCell};

use serde_json::Value;

use crate::action::UiAction;
use crate::chart::build_charts;
use crate::config::DashboardConfig;
use crate::error::{ApiError, FormError};
use crate::form::{check_required, modal_title, serialize_form, FormTemplate};
use crate::gateway::{ApiCall, Gateway, Transport};
use crate::page::Page;
use crate::query::{search_path, FilterControl};
use crate::render;
use crate::store::{LoadSlot, LoadTicket, ModalState, ReviewFilter, Store};
use crate::types::{
    DashboardSummary, EntityKind, GrammarPoint, ListEnvelope, ReviewItem, SearchResults, Sentence,
    Statistics, Word,
};
use crate::view::{ChartHandle, Counter, Region, ToastKind, View};

/// 必須項目が空のときの警告トースト
pub const MISSING_FIELD_TITLE: &str = "请填写必填项";

pub struct Dashboard<T, V> {
    gateway: Gateway<T>,
    view: V,
    store: RefCell<Store>,
}

fn log_failure(context: &str, result: Result<(), ApiError>) {
    if let Err(err) = result {
        log::error!("{} failed: {}", context, err);
    }
}

impl<T: Transport, V: View> Dashboard<T, V> {
    pub fn new(transport: T, view: V, config: DashboardConfig) -> Self {
        Self {
            gateway: Gateway::new(transport, config),
            view,
            store: RefCell::new(Store::new()),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    pub fn config(&self) -> &DashboardConfig {
        self.gateway.config()
    }

    /// ストアの読み取り。保持したまま `.await` しないこと。
    pub fn store(&self) -> Ref<'_, Store> {
        self.store.borrow()
    }

    fn current_page(&self) -> Page {
        self.store.borrow().current_page()
    }

    fn is_latest(&self, ticket: LoadTicket) -> bool {
        let latest = self.store.borrow().is_latest(ticket);
        if !latest {
            log::debug!("discarding stale response for {:?}", ticket.slot());
        }
        latest
    }

    /// 初期表示
    pub async fn start(&self) {
        self.navigate_to(Page::Dashboard).await;
    }

    // ---- ナビゲーション ----

    /// ページを切り替え、そのページの取得を1回だけ行う。
    /// 表示中のページへの遷移も再取得として扱う。
    pub async fn navigate_to(&self, page: Page) {
        log::debug!("navigate to {}", page.key());
        self.view.activate_page(page);
        self.view.set_title(page.title());
        self.store.borrow_mut().set_current_page(page);

        match page {
            Page::Dashboard => self.load_dashboard().await,
            Page::Words => self.load_words().await,
            Page::Sentences => self.load_sentences().await,
            Page::Grammar => self.load_grammar().await,
            Page::Review => self.load_review_items().await,
            Page::Statistics => self.load_statistics().await,
            Page::Search => {}
        }
    }

    // ---- 一覧 ----

    pub async fn load_words(&self) {
        self.load_list(EntityKind::Word).await;
    }

    pub async fn load_sentences(&self) {
        self.load_list(EntityKind::Sentence).await;
    }

    pub async fn load_grammar(&self) {
        self.load_list(EntityKind::Grammar).await;
    }

    pub async fn load_list(&self, kind: EntityKind) {
        log_failure(&format!("load {} list", kind.as_str()), self.fetch_list(kind).await);
    }

    async fn fetch_list(&self, kind: EntityKind) -> Result<(), ApiError> {
        let (ticket, path) = {
            let mut store = self.store.borrow_mut();
            let page = store.pagination(kind).page;
            (
                store.begin_load(LoadSlot::List(kind)),
                store.filters().list_path(kind, page),
            )
        };
        let call = ApiCall::get(path);

        let html = match kind {
            EntityKind::Word => {
                let envelope: ListEnvelope<Word> = self.gateway.request(&self.view, call).await?;
                if !self.is_latest(ticket) {
                    return Ok(());
                }
                let mut store = self.store.borrow_mut();
                store.set_total(kind, envelope.total());
                store.set_words(envelope.into_items());
                render::words_table(store.words())
            }
            EntityKind::Sentence => {
                let envelope: ListEnvelope<Sentence> =
                    self.gateway.request(&self.view, call).await?;
                if !self.is_latest(ticket) {
                    return Ok(());
                }
                let mut store = self.store.borrow_mut();
                store.set_total(kind, envelope.total());
                store.set_sentences(envelope.into_items());
                render::sentences_grid(store.sentences())
            }
            EntityKind::Grammar => {
                let envelope: ListEnvelope<GrammarPoint> =
                    self.gateway.request(&self.view, call).await?;
                if !self.is_latest(ticket) {
                    return Ok(());
                }
                let mut store = self.store.borrow_mut();
                store.set_total(kind, envelope.total());
                store.set_grammar(envelope.into_items());
                render::grammar_grid(store.grammar())
            }
        };

        self.view.set_html(Region::for_list(kind), html);
        self.render_pagination(kind);
        Ok(())
    }

    fn render_pagination(&self, kind: EntityKind) {
        let position = self.store.borrow().pagination(kind);
        let html = render::pagination(kind, position.page, position.total, self.config().page_size);
        self.view.set_html(Region::Pagination(kind), html);
    }

    /// ページ送り。1 未満のページは無視する。
    pub async fn change_page(&self, kind: EntityKind, page: u32) {
        let accepted = self.store.borrow_mut().set_page(kind, page);
        if accepted {
            self.load_list(kind).await;
        } else {
            log::debug!("ignoring page {} for {}", page, kind.as_str());
        }
    }

    /// 絞り込みの変更。対象一覧を1ページ目から取り直す。
    pub async fn set_filter(&self, control: FilterControl, value: &str) {
        self.store.borrow_mut().apply_filter(control, value);
        self.load_list(control.kind()).await;
    }

    // ---- 復習キュー ----

    pub async fn load_review_items(&self) {
        log_failure("load review queue", self.fetch_review_items().await);
    }

    async fn fetch_review_items(&self) -> Result<(), ApiError> {
        let ticket = self.store.borrow_mut().begin_load(LoadSlot::Review);
        let items: Vec<ReviewItem> = self
            .gateway
            .request(&self.view, ApiCall::get("/review/"))
            .await?;
        if !self.is_latest(ticket) {
            return Ok(());
        }
        let count = items.len() as u64;
        self.store.borrow_mut().set_review_items(items);
        self.view.set_counter(Counter::ReviewCount, count);
        self.render_review_list();
        Ok(())
    }

    fn render_review_list(&self) {
        let html = {
            let store = self.store.borrow();
            let items = store.visible_review_items();
            render::review_list(&items)
        };
        self.view.set_html(Region::ReviewList, html);
    }

    /// 復習キューの種別フィルタ。取得はせず、手元の一覧を描き直す。
    pub fn filter_review(&self, filter: ReviewFilter) {
        self.store.borrow_mut().set_review_filter(filter);
        self.render_review_list();
    }

    // ---- 統計 ----

    pub async fn load_statistics(&self) {
        log_failure("load statistics", self.fetch_statistics().await);
    }

    async fn fetch_statistics(&self) -> Result<(), ApiError> {
        let ticket = self.store.borrow_mut().begin_load(LoadSlot::Statistics);
        let stats: Statistics = self
            .gateway
            .request(&self.view, ApiCall::get("/stats/"))
            .await?;
        if !self.is_latest(ticket) {
            return Ok(());
        }

        let stale = self.store.borrow_mut().take_charts();
        for handle in stale {
            self.view.destroy_chart(handle);
        }
        let handles: Vec<ChartHandle> = build_charts(&stats)
            .iter()
            .filter_map(|(canvas, config)| self.view.draw_chart(*canvas, config))
            .collect();

        let mut store = self.store.borrow_mut();
        store.set_charts(handles);
        store.set_stats(stats);
        Ok(())
    }

    // ---- ダッシュボード ----

    pub async fn load_dashboard(&self) {
        log_failure("load dashboard", self.fetch_dashboard().await);
    }

    async fn fetch_dashboard(&self) -> Result<(), ApiError> {
        let ticket = self.store.borrow_mut().begin_load(LoadSlot::Dashboard);
        let summary: DashboardSummary = self
            .gateway
            .request(&self.view, ApiCall::get("/dashboard/"))
            .await?;
        if !self.is_latest(ticket) {
            return Ok(());
        }

        let counters = [
            (Counter::TotalWords, summary.total_words),
            (Counter::TotalSentences, summary.total_sentences),
            (Counter::TotalGrammar, summary.total_grammar),
            (Counter::TodayWords, summary.today_words),
            (Counter::TodaySentences, summary.today_sentences),
            (Counter::TodayGrammar, summary.today_grammar),
            (Counter::StreakDays, summary.study_streak),
            (Counter::ToReview, summary.to_review()),
            (Counter::ReviewBadge, summary.to_review()),
        ];
        for (counter, value) in counters {
            self.view.set_counter(counter, value);
        }
        self.view
            .set_html(Region::ActivityList, render::activity_list(&summary.recent_activities));
        self.store.borrow_mut().set_dashboard(summary);
        Ok(())
    }

    // ---- 検索 ----

    /// 横断検索。空白だけの語は何もしない。
    pub async fn perform_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.navigate_to(Page::Search).await;
        log_failure("search", self.fetch_search(query).await);
    }

    async fn fetch_search(&self, query: &str) -> Result<(), ApiError> {
        let ticket = self.store.borrow_mut().begin_load(LoadSlot::Search);
        let results: SearchResults = self
            .gateway
            .request(&self.view, ApiCall::get(search_path(query)))
            .await?;
        if !self.is_latest(ticket) {
            return Ok(());
        }
        self.view
            .set_html(Region::SearchResults, render::search_results(&results));
        self.store.borrow_mut().set_search(results);
        Ok(())
    }

    // ---- 作成・編集モーダル ----

    /// モーダルを開く。編集時は対象を取得して全項目を埋める。
    pub async fn open_modal(&self, kind: EntityKind, edit_id: Option<u64>) {
        let template = match edit_id {
            Some(id) => {
                let entity: Result<Value, ApiError> = self
                    .gateway
                    .request(&self.view, ApiCall::get(kind.item_path(id)))
                    .await;
                match entity {
                    Ok(entity) => FormTemplate::prefilled(kind, &entity),
                    Err(err) => {
                        log::error!("load {} {} for edit failed: {}", kind.as_str(), id, err);
                        return;
                    }
                }
            }
            None => FormTemplate::empty(kind),
        };
        self.view
            .show_form(modal_title(kind, edit_id.is_some()), &template);
        self.store
            .borrow_mut()
            .set_modal(Some(ModalState { kind, edit_id }));
    }

    pub fn close_modal(&self) {
        self.view.close_form();
        self.store.borrow_mut().set_modal(None);
    }

    /// フォーム送信。必須項目が空なら警告だけ出して送らない。
    pub async fn submit_form(&self) {
        let modal = self.store.borrow().modal();
        let Some(modal) = modal else {
            log::warn!("{}", FormError::NoModal);
            return;
        };
        let pairs = self.view.read_form();
        if let Err(FormError::MissingRequired(label)) = check_required(modal.kind, &pairs) {
            self.view.show_toast(
                ToastKind::Warning,
                MISSING_FIELD_TITLE,
                &format!("{}不能为空", label),
            );
            return;
        }

        let body = serialize_form(&pairs);
        let call = match modal.edit_id {
            Some(id) => ApiCall::put(modal.kind.item_path(id)),
            None => ApiCall::post(modal.kind.collection_path()),
        }
        .with_body(body);

        let saved: Result<Value, ApiError> = self.gateway.request(&self.view, call).await;
        if let Err(err) = saved {
            log::error!("save {} failed: {}", modal.kind.as_str(), err);
            return;
        }

        let message = if modal.edit_id.is_some() {
            "更新成功"
        } else {
            "添加成功"
        };
        self.view.show_toast(ToastKind::Success, "成功", message);
        self.close_modal();

        match self.current_page() {
            Page::Words => self.load_words().await,
            Page::Sentences => self.load_sentences().await,
            Page::Grammar => self.load_grammar().await,
            Page::Dashboard => self.load_dashboard().await,
            _ => {}
        }
    }

    // ---- 詳細モーダル ----

    pub async fn show_detail(&self, kind: EntityKind, id: u64) {
        log_failure(
            &format!("load {} {} detail", kind.as_str(), id),
            self.fetch_detail(kind, id).await,
        );
    }

    async fn fetch_detail(&self, kind: EntityKind, id: u64) -> Result<(), ApiError> {
        let entity: Value = self
            .gateway
            .request(&self.view, ApiCall::get(kind.item_path(id)))
            .await?;
        let body = render::detail_body(kind, &entity)?;
        self.view.show_detail(render::detail_title(kind), body);
        self.store.borrow_mut().set_detail(Some((kind, id)));
        Ok(())
    }

    pub fn close_detail(&self) {
        self.view.close_detail();
        self.store.borrow_mut().set_detail(None);
    }

    /// 詳細モーダルの「复习」ボタン。モーダルを閉じて対象を復習する。
    pub async fn run_detail_action(&self) {
        let target = self.store.borrow().detail();
        self.close_detail();
        if let Some((kind, id)) = target {
            self.review(kind, id).await;
        }
    }

    // ---- 更新操作 ----

    /// 復習後の再取得。対象の一覧を表示中ならその一覧、復習ページなら復習キュー。
    async fn refresh_after_review(&self, kind: EntityKind) {
        let page = self.current_page();
        if page.list_kind() == Some(kind) {
            self.load_list(kind).await;
        } else if page == Page::Review {
            self.load_review_items().await;
        }
    }

    /// 収藏・掌握・削除後の再取得。復習ページ以外では表示中のページに関係なく
    /// 対象の一覧を取り直す。
    async fn refresh_owner_list(&self, kind: EntityKind) {
        if self.current_page() == Page::Review {
            self.load_review_items().await;
        } else {
            self.load_list(kind).await;
        }
    }

    async fn post_action(&self, kind: EntityKind, id: u64, action: &str) -> Result<Value, ApiError> {
        let path = format!("{}{}/", kind.item_path(id), action);
        self.gateway.request(&self.view, ApiCall::post(path)).await
    }

    pub async fn review(&self, kind: EntityKind, id: u64) {
        if let Err(err) = self.post_action(kind, id, "review").await {
            log::error!("review {} {} failed: {}", kind.as_str(), id, err);
            return;
        }
        self.view.show_toast(
            ToastKind::Success,
            "复习完成",
            &format!("{}复习记录已更新", kind.label()),
        );
        self.refresh_after_review(kind).await;
    }

    fn cached_favorite(&self, kind: EntityKind, id: u64) -> Option<bool> {
        let store = self.store.borrow();
        match kind {
            EntityKind::Word => store.words().iter().find(|w| w.id == id).map(|w| w.is_favorite),
            EntityKind::Sentence => store
                .sentences()
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.is_favorite),
            EntityKind::Grammar => None,
        }
    }

    /// 収藏の切り替え（単語と文のみ）
    pub async fn toggle_favorite(&self, kind: EntityKind, id: u64) {
        if kind == EntityKind::Grammar {
            log::warn!("grammar points have no favorite flag");
            return;
        }
        let cached = self.cached_favorite(kind, id);
        let response = match self.post_action(kind, id, "toggle_favorite").await {
            Ok(response) => response,
            Err(err) => {
                log::error!("toggle favorite {} {} failed: {}", kind.as_str(), id, err);
                return;
            }
        };
        let now_favorite = response
            .get("is_favorite")
            .and_then(Value::as_bool)
            .or(cached.map(|was| !was))
            // 応答にも手元にも状態がなければ「付けた」とみなす
            .unwrap_or(true);
        let message = if now_favorite {
            "已添加到收藏"
        } else {
            "已取消收藏"
        };
        self.view.show_toast(ToastKind::Success, "操作成功", message);
        self.refresh_owner_list(kind).await;
    }

    pub async fn toggle_mastered(&self, id: u64) {
        let kind = EntityKind::Grammar;
        let cached = self
            .store
            .borrow()
            .grammar()
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.is_mastered);
        let response = match self.post_action(kind, id, "toggle_mastered").await {
            Ok(response) => response,
            Err(err) => {
                log::error!("toggle mastered {} failed: {}", id, err);
                return;
            }
        };
        let now_mastered = response
            .get("is_mastered")
            .and_then(Value::as_bool)
            .or(cached.map(|was| !was))
            // 同上
            .unwrap_or(true);
        let message = if now_mastered {
            "已标记为掌握"
        } else {
            "已标记为未掌握"
        };
        self.view.show_toast(ToastKind::Success, "操作成功", message);
        self.refresh_owner_list(kind).await;
    }

    /// 確認のうえ削除する。キャンセル時は何も送らない。
    pub async fn delete(&self, kind: EntityKind, id: u64) {
        if !self
            .view
            .confirm(&format!("确定要删除这个{}吗？", kind.label()))
        {
            return;
        }
        let deleted: Result<Value, ApiError> = self
            .gateway
            .request(&self.view, ApiCall::delete(kind.item_path(id)))
            .await;
        if let Err(err) = deleted {
            log::error!("delete {} {} failed: {}", kind.as_str(), id, err);
            return;
        }
        self.view.show_toast(
            ToastKind::Success,
            "删除成功",
            &format!("{}已删除", kind.label()),
        );
        self.refresh_owner_list(kind).await;
    }

    // ---- ディスパッチ ----

    pub async fn dispatch(&self, action: UiAction) {
        log::debug!("dispatch {:?}", action);
        match action {
            UiAction::ShowDetail(kind, id) => self.show_detail(kind, id).await,
            UiAction::ToggleFavorite(kind, id) => self.toggle_favorite(kind, id).await,
            UiAction::ToggleMastered(id) => self.toggle_mastered(id).await,
            UiAction::Review(kind, id) => self.review(kind, id).await,
            UiAction::Delete(kind, id) => self.delete(kind, id).await,
            UiAction::Edit(kind, id) => self.open_modal(kind, Some(id)).await,
            UiAction::OpenModal(kind) => self.open_modal(kind, None).await,
            UiAction::ChangePage(kind, page) => self.change_page(kind, page).await,
            UiAction::Navigate(page) => self.navigate_to(page).await,
            UiAction::FilterReview(filter) => self.filter_review(filter),
            UiAction::QuickAdd => self.open_modal(EntityKind::Word, None).await,
            UiAction::SubmitForm => self.submit_form().await,
            UiAction::CloseModal => self.close_modal(),
            UiAction::CloseDetail => self.close_detail(),
            UiAction::DetailAction => self.run_detail_action().await,
            UiAction::None => {}
        }
    }
}
