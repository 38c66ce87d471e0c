//! `data-action` 属性で表現される画面操作
//!
//! 描画側が属性を書き、ブラウザ側がクリック位置から最も近い
//! `data-action` を持つ要素を探して [`UiAction::parse`] に渡す。

use crate::page::Page;
use crate::store::ReviewFilter;
use crate::types::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ShowDetail(EntityKind, u64),
    ToggleFavorite(EntityKind, u64),
    ToggleMastered(u64),
    Review(EntityKind, u64),
    Delete(EntityKind, u64),
    Edit(EntityKind, u64),
    OpenModal(EntityKind),
    ChangePage(EntityKind, u32),
    Navigate(Page),
    FilterReview(ReviewFilter),
    QuickAdd,
    SubmitForm,
    CloseModal,
    CloseDetail,
    /// 詳細モーダルの「复习」
    DetailAction,
    /// クリックを吸収するだけ（行内のチェックボックス欄など）
    None,
}

impl UiAction {
    /// 要素の属性から操作を組み立てる。`attr` は `data-*` 名を受けて値を返す。
    /// 属性が欠けている、または解釈できない場合は `None`。
    pub fn parse<F>(attr: F) -> Option<UiAction>
    where
        F: Fn(&str) -> Option<String>,
    {
        let action = attr("data-action")?;
        let kind = || attr("data-kind").and_then(|k| EntityKind::parse(&k));
        let id = || attr("data-id").and_then(|id| id.parse::<u64>().ok());

        let parsed = match action.as_str() {
            "show-detail" => UiAction::ShowDetail(kind()?, id()?),
            "toggle-favorite" => {
                let kind = kind()?;
                if kind == EntityKind::Grammar {
                    return None;
                }
                UiAction::ToggleFavorite(kind, id()?)
            }
            "toggle-mastered" => UiAction::ToggleMastered(id()?),
            "review" => UiAction::Review(kind()?, id()?),
            "delete" => UiAction::Delete(kind()?, id()?),
            "edit" => UiAction::Edit(kind()?, id()?),
            "open-modal" => UiAction::OpenModal(kind()?),
            "change-page" => {
                let list = attr("data-list").and_then(|k| EntityKind::parse(&k))?;
                // 1ページ目の「上一页」は 0 を運ぶ。範囲外はストアが無視する。
                let page = attr("data-page")?.parse::<i64>().ok()?;
                UiAction::ChangePage(list, u32::try_from(page).ok()?)
            }
            "navigate" => UiAction::Navigate(attr("data-page").and_then(|p| Page::parse(&p))?),
            "filter-review" => {
                UiAction::FilterReview(attr("data-filter").and_then(|f| ReviewFilter::parse(&f))?)
            }
            "quick-add" => UiAction::QuickAdd,
            "submit-form" => UiAction::SubmitForm,
            "close-modal" => UiAction::CloseModal,
            "close-detail" => UiAction::CloseDetail,
            "detail-action" => UiAction::DetailAction,
            "none" => UiAction::None,
            other => {
                log::debug!("unknown action: {}", other);
                return None;
            }
        };
        Some(parsed)
    }
}
