//! 一覧系の描画（単語表、文カード、文法カード、復習キュー、活動、検索）

use super::{action_attrs, empty_state, escape_html, escape_opt, last_reviewed_text};
use crate::types::{
    Activity, EntityKind, GrammarPoint, ReviewItem, SearchResults, Sentence, Word,
};

fn icon_button(action: &str, kind: EntityKind, id: u64, icon: &str, title: &str) -> String {
    format!(
        r#"<button class="btn-icon" {} title="{}"><i class="fas {}"></i></button>"#,
        action_attrs(action, kind, id),
        title,
        icon
    )
}

fn favorite_button(kind: EntityKind, id: u64, is_favorite: bool) -> String {
    let (icon, title) = if is_favorite {
        ("fa-star", "取消收藏")
    } else {
        ("fa-star-o", "收藏")
    };
    icon_button("toggle-favorite", kind, id, icon, title)
}

fn add_empty_state(kind: EntityKind, heading: &str, hint: &str, button: &str) -> String {
    format!(
        concat!(
            r#"<div class="empty-state"><i class="fas {icon}"></i><h3>{heading}</h3><p>{hint}</p>"#,
            r#"<button class="btn btn-primary" data-action="open-modal" data-kind="{kind}">"#,
            r#"<i class="fas fa-plus"></i> {button}</button></div>"#
        ),
        icon = kind.icon(),
        heading = heading,
        hint = hint,
        kind = kind.as_str(),
        button = button
    )
}

/// 単語表の tbody
pub fn words_table(words: &[Word]) -> String {
    if words.is_empty() {
        return format!(
            r#"<tr><td colspan="7" class="empty-state"><i class="fas {}"></i><p>暂无单词数据</p></td></tr>"#,
            EntityKind::Word.icon()
        );
    }
    let kind = EntityKind::Word;
    words
        .iter()
        .map(|word| {
            format!(
                concat!(
                    "<tr {row}>",
                    r#"<td data-action="none"><input type="checkbox" value="{id}"></td>"#,
                    "<td><strong>{word}</strong></td>",
                    "<td><em>{phonetic}</em></td>",
                    "<td>{meaning}</td>",
                    r#"<td><span class="difficulty {difficulty}">{difficulty_label}</span></td>"#,
                    "<td>{review_count}</td>",
                    r#"<td data-action="none">{favorite}{review}{edit}{delete}</td>"#,
                    "</tr>"
                ),
                row = action_attrs("show-detail", kind, word.id),
                id = word.id,
                word = escape_html(&word.word),
                phonetic = word
                    .phonetic
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .map(escape_html)
                    .unwrap_or_else(|| "-".to_string()),
                meaning = escape_html(&word.meaning),
                difficulty = word.difficulty.as_str(),
                difficulty_label = word.difficulty.label(),
                review_count = word.review_count,
                favorite = favorite_button(kind, word.id, word.is_favorite),
                review = icon_button("review", kind, word.id, "fa-redo", "复习"),
                edit = icon_button("edit", kind, word.id, "fa-edit", "编辑"),
                delete = icon_button("delete", kind, word.id, "fa-trash", "删除"),
            )
        })
        .collect()
}

/// 文カードのグリッド
pub fn sentences_grid(sentences: &[Sentence]) -> String {
    if sentences.is_empty() {
        return add_empty_state(
            EntityKind::Sentence,
            "暂无句子数据",
            "点击&quot;添加句子&quot;按钮开始添加",
            "添加句子",
        );
    }
    let kind = EntityKind::Sentence;
    sentences
        .iter()
        .map(|sentence| {
            format!(
                concat!(
                    r#"<div class="sentence-card" {card}>"#,
                    r#"<p class="english">{english}</p>"#,
                    r#"<p class="chinese">{chinese}</p>"#,
                    r#"<div class="meta"><span class="type">{type_label}</span>"#,
                    r#"<div class="actions" data-action="none">{favorite}{review}{edit}{delete}</div>"#,
                    "</div></div>"
                ),
                card = action_attrs("show-detail", kind, sentence.id),
                english = escape_html(&sentence.english),
                chinese = escape_html(&sentence.chinese),
                type_label = sentence.sentence_type.label(),
                favorite = favorite_button(kind, sentence.id, sentence.is_favorite),
                review = icon_button("review", kind, sentence.id, "fa-redo", "复习"),
                edit = icon_button("edit", kind, sentence.id, "fa-edit", "编辑"),
                delete = icon_button("delete", kind, sentence.id, "fa-trash", "删除"),
            )
        })
        .collect()
}

/// 文法カードのグリッド
pub fn grammar_grid(items: &[GrammarPoint]) -> String {
    if items.is_empty() {
        return add_empty_state(
            EntityKind::Grammar,
            "暂无语法数据",
            "点击&quot;添加语法&quot;按钮开始添加",
            "添加语法",
        );
    }
    let kind = EntityKind::Grammar;
    items
        .iter()
        .map(|item| {
            let (class, icon, text) = if item.is_mastered {
                ("btn-success", "fa-check", "已掌握")
            } else {
                ("btn-secondary", "fa-circle", "标记掌握")
            };
            format!(
                concat!(
                    r#"<div class="grammar-card" {card}>"#,
                    r#"<div class="header"><h4 class="title">{title}</h4>"#,
                    r#"<span class="difficulty {difficulty}">{difficulty_label}</span></div>"#,
                    r#"<div class="structure">{structure}</div>"#,
                    r#"<p class="category">{category}</p>"#,
                    r#"<div class="actions" data-action="none">"#,
                    r#"<button class="btn btn-sm {class}" {toggle}><i class="fas {icon}"></i> {text}</button>"#,
                    "{edit}{delete}</div></div>"
                ),
                card = action_attrs("show-detail", kind, item.id),
                title = escape_html(&item.title),
                difficulty = item.difficulty.as_str(),
                difficulty_label = item.difficulty.label(),
                structure = escape_html(&item.structure),
                category = escape_opt(&item.category),
                class = class,
                toggle = action_attrs("toggle-mastered", kind, item.id),
                icon = icon,
                text = text,
                edit = icon_button("edit", kind, item.id, "fa-edit", "编辑"),
                delete = icon_button("delete", kind, item.id, "fa-trash", "删除"),
            )
        })
        .collect()
}

/// 復習キュー（フィルタ適用済みの項目を受け取る）
pub fn review_list(items: &[&ReviewItem]) -> String {
    if items.is_empty() {
        return concat!(
            r#"<div class="empty-state"><i class="fas fa-check-circle"></i>"#,
            "<h3>太棒了！</h3><p>暂时没有需要复习的内容</p></div>"
        )
        .to_string();
    }
    items
        .iter()
        .map(|item| {
            format!(
                concat!(
                    r#"<div class="review-item"><div class="review-item-info">"#,
                    r#"<span class="review-item-type {kind}">{kind_label}</span>"#,
                    r#"<h4 class="review-item-title">{title}</h4>"#,
                    r#"<p class="review-item-meta">{last} · 已复习 {count} 次</p></div>"#,
                    r#"<div class="review-item-actions"><button class="btn btn-primary" {review}>"#,
                    r#"<i class="fas fa-redo"></i> 复习</button></div></div>"#
                ),
                kind = item.kind.as_str(),
                kind_label = item.kind.label(),
                title = escape_html(&item.title),
                last = last_reviewed_text(item.last_reviewed.as_ref()),
                count = item.review_count,
                review = action_attrs("review", item.kind, item.id),
            )
        })
        .collect()
}

/// ダッシュボードの最近の活動
pub fn activity_list(activities: &[Activity]) -> String {
    if activities.is_empty() {
        return empty_state("fa-clock", "暂无学习活动");
    }
    activities
        .iter()
        .map(|activity| {
            let icon = EntityKind::parse(&activity.kind)
                .map(|kind| kind.icon())
                .unwrap_or("fa-circle");
            format!(
                concat!(
                    r#"<div class="activity-item"><div class="activity-icon {kind}">"#,
                    r#"<i class="fas {icon}"></i></div>"#,
                    r#"<div class="activity-content"><p>{action}</p><span>{time}</span></div></div>"#
                ),
                kind = escape_html(&activity.kind),
                icon = icon,
                action = escape_html(&activity.action),
                time = escape_html(&activity.time),
            )
        })
        .collect()
}

fn result_section(kind: EntityKind, count: usize, body: String) -> String {
    format!(
        r#"<div class="search-result-section"><h4><i class="fas {}"></i> {} ({})</h4>{}</div>"#,
        kind.icon(),
        kind.label(),
        count,
        body
    )
}

/// 横断検索の結果パネル。3種類とも空なら案内だけを出す。
pub fn search_results(results: &SearchResults) -> String {
    if results.is_empty() {
        return concat!(
            r#"<div class="empty-state"><i class="fas fa-search"></i>"#,
            "<h3>未找到结果</h3><p>尝试使用其他关键词搜索</p></div>"
        )
        .to_string();
    }

    let mut html = String::new();
    if !results.words.is_empty() {
        let rows: String = results
            .words
            .iter()
            .map(|word| {
                format!(
                    r#"<tr {}><td><strong>{}</strong></td><td>{}</td><td><span class="difficulty {}">{}</span></td></tr>"#,
                    action_attrs("show-detail", EntityKind::Word, word.id),
                    escape_html(&word.word),
                    escape_html(&word.meaning),
                    word.difficulty.as_str(),
                    word.difficulty.label()
                )
            })
            .collect();
        html.push_str(&result_section(
            EntityKind::Word,
            results.words.len(),
            format!(
                r#"<div class="data-table-container"><table class="data-table"><tbody>{}</tbody></table></div>"#,
                rows
            ),
        ));
    }
    if !results.sentences.is_empty() {
        let cards: String = results
            .sentences
            .iter()
            .map(|sentence| {
                format!(
                    r#"<div class="sentence-card" {}><p class="english">{}</p><p class="chinese">{}</p></div>"#,
                    action_attrs("show-detail", EntityKind::Sentence, sentence.id),
                    escape_html(&sentence.english),
                    escape_html(&sentence.chinese)
                )
            })
            .collect();
        html.push_str(&result_section(
            EntityKind::Sentence,
            results.sentences.len(),
            format!(r#"<div class="sentences-grid">{}</div>"#, cards),
        ));
    }
    if !results.grammar.is_empty() {
        let cards: String = results
            .grammar
            .iter()
            .map(|item| {
                format!(
                    r#"<div class="grammar-card" {}><div class="header"><h4 class="title">{}</h4></div><div class="structure">{}</div></div>"#,
                    action_attrs("show-detail", EntityKind::Grammar, item.id),
                    escape_html(&item.title),
                    escape_html(&item.structure)
                )
            })
            .collect();
        html.push_str(&result_section(
            EntityKind::Grammar,
            results.grammar.len(),
            format!(r#"<div class="grammar-grid">{}</div>"#, cards),
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn word(id: u64, text: &str) -> Word {
        Word {
            id,
            word: text.to_string(),
            meaning: "意味".to_string(),
            difficulty: Difficulty::Hard,
            ..Default::default()
        }
    }

    #[test]
    fn test_words_table_escapes_user_text() {
        let html = words_table(&[word(1, "<script>x</script>")]);
        assert!(html.contains("<strong>&lt;script&gt;x&lt;/script&gt;</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_words_table_actions() {
        let html = words_table(&[word(42, "cat")]);
        assert!(html.starts_with(r#"<tr data-action="show-detail" data-kind="word" data-id="42">"#));
        assert!(html.contains(r#"<td data-action="none"><input type="checkbox" value="42"></td>"#));
        for action in ["toggle-favorite", "review", "edit", "delete"] {
            assert!(
                html.contains(&format!(r#"data-action="{}" data-kind="word" data-id="42""#, action)),
                "{}",
                action
            );
        }
        assert!(html.contains("<em>-</em>"));
        assert!(html.contains(r#"<span class="difficulty hard">困难</span>"#));
    }

    #[test]
    fn test_favorite_icon_follows_state() {
        let mut w = word(1, "cat");
        assert!(words_table(std::slice::from_ref(&w)).contains("fa-star-o"));
        w.is_favorite = true;
        let html = words_table(&[w]);
        assert!(html.contains(r#"title="取消收藏"><i class="fas fa-star"></i>"#));
    }

    #[test]
    fn test_empty_states() {
        assert!(words_table(&[]).contains("暂无单词数据"));
        let sentences = sentences_grid(&[]);
        assert!(sentences.contains(r#"data-action="open-modal" data-kind="sentence""#));
        let grammar = grammar_grid(&[]);
        assert!(grammar.contains(r#"data-action="open-modal" data-kind="grammar""#));
        assert!(review_list(&[]).contains("暂时没有需要复习的内容"));
        assert!(activity_list(&[]).contains("暂无学习活动"));
    }

    #[test]
    fn test_grammar_mastered_toggle() {
        let item = GrammarPoint {
            id: 5,
            title: "虚拟语气".into(),
            is_mastered: true,
            ..Default::default()
        };
        let html = grammar_grid(&[item]);
        assert!(html.contains(r#"btn-success" data-action="toggle-mastered" data-kind="grammar" data-id="5""#));
        assert!(html.contains("已掌握"));
        assert!(!html.contains("toggle-favorite"));
    }

    #[test]
    fn test_review_list_meta() {
        let item = ReviewItem {
            kind: EntityKind::Sentence,
            id: 8,
            title: "How are you?".into(),
            content: None,
            review_count: 3,
            last_reviewed: None,
        };
        let html = review_list(&[&item]);
        assert!(html.contains("从未复习 · 已复习 3 次"));
        assert!(html.contains(r#"data-action="review" data-kind="sentence" data-id="8""#));
        assert!(html.contains(r#"review-item-type sentence">句子"#));
    }

    #[test]
    fn test_activity_text_escaped() {
        let activity = Activity {
            kind: "word".into(),
            action: "添加了单词 <b>".into(),
            time: "刚刚".into(),
        };
        let html = activity_list(&[activity]);
        assert!(html.contains("添加了单词 &lt;b&gt;"));
        assert!(html.contains("fa-book"));

        let unknown = Activity {
            kind: "other".into(),
            ..Default::default()
        };
        assert!(activity_list(&[unknown]).contains("fa-circle"));
    }

    #[test]
    fn test_search_results_sections() {
        assert!(search_results(&SearchResults::default()).contains("未找到结果"));

        let results = SearchResults {
            words: vec![word(1, "run"), word(2, "ran")],
            ..Default::default()
        };
        let html = search_results(&results);
        assert!(html.contains("单词 (2)"));
        assert!(!html.contains("句子 ("));
        assert!(!html.contains("未找到结果"));
    }
}
