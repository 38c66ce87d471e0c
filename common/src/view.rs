//! DOM 側との境界
//!
//! コントローラは `View` を通してのみ画面に触れる。ブラウザ実装は
//! `lingo-web`、テストでは記録用の実装を使う。

use crate::chart::ChartConfig;
use crate::form::FormTemplate;
use crate::page::Page;
use crate::types::EntityKind;

/// マークアップを流し込むコンテナ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    WordsTable,
    SentencesGrid,
    GrammarGrid,
    ReviewList,
    ActivityList,
    SearchResults,
    Pagination(EntityKind),
    DetailBody,
}

impl Region {
    pub fn element_id(&self) -> &'static str {
        match self {
            Region::WordsTable => "wordsTableBody",
            Region::SentencesGrid => "sentencesGrid",
            Region::GrammarGrid => "grammarGrid",
            Region::ReviewList => "reviewList",
            Region::ActivityList => "activityList",
            Region::SearchResults => "searchResults",
            Region::Pagination(EntityKind::Word) => "wordsPagination",
            Region::Pagination(EntityKind::Sentence) => "sentencesPagination",
            Region::Pagination(EntityKind::Grammar) => "grammarPagination",
            Region::DetailBody => "detailModalBody",
        }
    }

    pub fn for_list(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Word => Region::WordsTable,
            EntityKind::Sentence => Region::SentencesGrid,
            EntityKind::Grammar => Region::GrammarGrid,
        }
    }
}

/// テキストだけを差し替える数値表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    TotalWords,
    TotalSentences,
    TotalGrammar,
    TodayWords,
    TodaySentences,
    TodayGrammar,
    StreakDays,
    ToReview,
    ReviewBadge,
    ReviewCount,
}

impl Counter {
    pub fn element_id(&self) -> &'static str {
        match self {
            Counter::TotalWords => "totalWords",
            Counter::TotalSentences => "totalSentences",
            Counter::TotalGrammar => "totalGrammar",
            Counter::TodayWords => "todayWords",
            Counter::TodaySentences => "todaySentences",
            Counter::TodayGrammar => "todayGrammar",
            Counter::StreakDays => "streakDays",
            Counter::ToReview => "toReview",
            Counter::ReviewBadge => "reviewBadge",
            Counter::ReviewCount => "reviewCount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-times-circle",
            ToastKind::Warning => "fa-exclamation-triangle",
            ToastKind::Info => "fa-info-circle",
        }
    }
}

/// 統計ページのキャンバス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartCanvas {
    WordDifficulty,
    SentenceType,
    GrammarDifficulty,
    Weekly,
}

impl ChartCanvas {
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartCanvas::WordDifficulty => "wordDifficultyChart",
            ChartCanvas::SentenceType => "sentenceTypeChart",
            ChartCanvas::GrammarDifficulty => "grammarDifficultyChart",
            ChartCanvas::Weekly => "weeklyChart",
        }
    }
}

/// 描画済みチャートのハンドル。破棄するまで View 側が実体を保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u32);

pub trait View {
    /// ナビとページ要素の active を付け替える
    fn activate_page(&self, page: Page);
    fn set_title(&self, title: &str);
    fn set_html(&self, region: Region, html: String);
    fn set_counter(&self, counter: Counter, value: u64);

    fn show_toast(&self, kind: ToastKind, title: &str, message: &str);
    fn set_busy(&self, busy: bool);
    fn confirm(&self, message: &str) -> bool;

    fn show_form(&self, title: &str, template: &FormTemplate);
    /// フォームの名前付きフィールドを (name, value) で返す
    fn read_form(&self) -> Vec<(String, String)>;
    fn close_form(&self);

    fn show_detail(&self, title: &str, body: String);
    fn close_detail(&self);

    fn draw_chart(&self, canvas: ChartCanvas, config: &ChartConfig) -> Option<ChartHandle>;
    fn destroy_chart(&self, handle: ChartHandle);
}
