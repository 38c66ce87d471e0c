//! ビュー状態ストア
//!
//! 画面に関するキャッシュ（一覧、ページ位置、統計、チャートハンドル）を
//! すべてここで保持する。描画関数は借用するだけで、書き換えは
//! 型付きのメソッド経由に限る。一覧は取得成功時に丸ごと置き換え、
//! 部分更新はしない。

use std::collections::HashMap;

use crate::page::Page;
use crate::query::{FilterControl, Filters};
use crate::types::{
    DashboardSummary, EntityKind, GrammarPoint, ReviewItem, SearchResults, Sentence, Statistics,
    Word,
};
use crate::view::ChartHandle;

/// 一覧ごとのページ位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, total: 0 }
    }
}

/// 取得処理の単位。古いレスポンスの破棄はこの単位で判定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadSlot {
    List(EntityKind),
    Review,
    Statistics,
    Dashboard,
    Search,
}

/// 発行済みの取得に付ける番号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    slot: LoadSlot,
    seq: u64,
}

impl LoadTicket {
    pub fn slot(&self) -> LoadSlot {
        self.slot
    }
}

/// 復習キューの種別フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewFilter {
    #[default]
    All,
    Only(EntityKind),
}

impl ReviewFilter {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "all" => Some(ReviewFilter::All),
            other => EntityKind::parse(other).map(ReviewFilter::Only),
        }
    }

    pub fn matches(&self, item: &ReviewItem) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Only(kind) => item.kind == *kind,
        }
    }
}

/// 開いている作成・編集モーダル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalState {
    pub kind: EntityKind,
    pub edit_id: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Store {
    current_page: Page,
    words: Vec<Word>,
    sentences: Vec<Sentence>,
    grammar: Vec<GrammarPoint>,
    review_items: Vec<ReviewItem>,
    review_filter: ReviewFilter,
    stats: Option<Statistics>,
    dashboard: Option<DashboardSummary>,
    search: Option<SearchResults>,
    pagination: HashMap<EntityKind, Pagination>,
    filters: Filters,
    charts: Vec<ChartHandle>,
    modal: Option<ModalState>,
    detail: Option<(EntityKind, u64)>,
    issued: HashMap<LoadSlot, u64>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn set_current_page(&mut self, page: Page) {
        self.current_page = page;
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn grammar(&self) -> &[GrammarPoint] {
        &self.grammar
    }

    pub fn set_words(&mut self, words: Vec<Word>) {
        self.words = words;
    }

    pub fn set_sentences(&mut self, sentences: Vec<Sentence>) {
        self.sentences = sentences;
    }

    pub fn set_grammar(&mut self, grammar: Vec<GrammarPoint>) {
        self.grammar = grammar;
    }

    pub fn review_items(&self) -> &[ReviewItem] {
        &self.review_items
    }

    pub fn set_review_items(&mut self, items: Vec<ReviewItem>) {
        self.review_items = items;
    }

    pub fn review_filter(&self) -> ReviewFilter {
        self.review_filter
    }

    pub fn set_review_filter(&mut self, filter: ReviewFilter) {
        self.review_filter = filter;
    }

    /// 現在のフィルタを通した復習キュー
    pub fn visible_review_items(&self) -> Vec<&ReviewItem> {
        self.review_items
            .iter()
            .filter(|item| self.review_filter.matches(item))
            .collect()
    }

    pub fn stats(&self) -> Option<&Statistics> {
        self.stats.as_ref()
    }

    pub fn set_stats(&mut self, stats: Statistics) {
        self.stats = Some(stats);
    }

    pub fn dashboard(&self) -> Option<&DashboardSummary> {
        self.dashboard.as_ref()
    }

    pub fn set_dashboard(&mut self, summary: DashboardSummary) {
        self.dashboard = Some(summary);
    }

    pub fn search(&self) -> Option<&SearchResults> {
        self.search.as_ref()
    }

    pub fn set_search(&mut self, results: SearchResults) {
        self.search = Some(results);
    }

    pub fn pagination(&self, kind: EntityKind) -> Pagination {
        self.pagination.get(&kind).copied().unwrap_or_default()
    }

    /// ページ番号を設定する。1 未満は無視して false を返す。
    pub fn set_page(&mut self, kind: EntityKind, page: u32) -> bool {
        if page < 1 {
            return false;
        }
        self.pagination.entry(kind).or_default().page = page;
        true
    }

    pub fn set_total(&mut self, kind: EntityKind, total: u64) {
        self.pagination.entry(kind).or_default().total = total;
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// 絞り込みを更新し、その一覧を1ページ目に戻す
    pub fn apply_filter(&mut self, control: FilterControl, value: &str) {
        self.filters.apply(control, value);
        self.set_page(control.kind(), 1);
    }

    /// 保持中のチャートハンドルをすべて取り出す（破棄用）
    pub fn take_charts(&mut self) -> Vec<ChartHandle> {
        std::mem::take(&mut self.charts)
    }

    pub fn charts(&self) -> &[ChartHandle] {
        &self.charts
    }

    pub fn set_charts(&mut self, charts: Vec<ChartHandle>) {
        self.charts = charts;
    }

    pub fn modal(&self) -> Option<ModalState> {
        self.modal
    }

    pub fn set_modal(&mut self, modal: Option<ModalState>) {
        self.modal = modal;
    }

    pub fn detail(&self) -> Option<(EntityKind, u64)> {
        self.detail
    }

    pub fn set_detail(&mut self, detail: Option<(EntityKind, u64)>) {
        self.detail = detail;
    }

    /// 新しい取得を発行し、その番号を返す
    pub fn begin_load(&mut self, slot: LoadSlot) -> LoadTicket {
        let seq = self.issued.entry(slot).or_insert(0);
        *seq += 1;
        LoadTicket { slot, seq: *seq }
    }

    /// この取得が同じ単位で最後に発行されたものか
    pub fn is_latest(&self, ticket: LoadTicket) -> bool {
        self.issued.get(&ticket.slot).copied() == Some(ticket.seq)
    }
}
