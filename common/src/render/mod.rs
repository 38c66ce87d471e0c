//! マークアップ生成
//!
//! すべて状態を借用して文字列を返す純粋関数。利用者が入力した文字列は
//! 必ず [`escape_html`] を通す。ID、真偽値由来のクラス、列挙の表示名は
//! そのまま埋め込む。
//!
//! クリック可能な要素には `data-action` を付け、ブラウザ側は
//! 最も近い祖先の `data-action` だけを解釈する。

mod detail;
mod form;
mod lists;
mod pagination;

pub use detail::{detail_body, detail_title};
pub use form::form_fields;
pub use lists::{
    activity_list, grammar_grid, review_list, search_results, sentences_grid, words_table,
};
pub use pagination::pagination;

use chrono::{DateTime, FixedOffset};

use crate::types::EntityKind;

/// `& < > " '` を実体参照に置き換える
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 任意項目。None は空文字列。
pub fn escape_opt(text: &Option<String>) -> String {
    text.as_deref().map(escape_html).unwrap_or_default()
}

/// 前回の復習日時の表示
pub fn last_reviewed_text(at: Option<&DateTime<FixedOffset>>) -> String {
    match at {
        Some(at) => format!("上次复习: {}", at.format("%Y/%-m/%-d")),
        None => "从未复习".to_string(),
    }
}

/// 行・カード要素に付けるアクション属性
fn action_attrs(action: &str, kind: EntityKind, id: u64) -> String {
    format!(
        r#"data-action="{}" data-kind="{}" data-id="{}""#,
        action,
        kind.as_str(),
        id
    )
}

fn empty_state(icon: &str, message: &str) -> String {
    format!(
        r#"<div class="empty-state"><i class="fas {}"></i><p>{}</p></div>"#,
        icon, message
    )
}
