use super::{escape_html, escape_opt};
use crate::types::{non_empty, EntityKind, GrammarPoint, Sentence, Word};

pub fn detail_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Word => "单词详情",
        EntityKind::Sentence => "句子详情",
        EntityKind::Grammar => "语法详情",
    }
}

fn optional_line(label: &str, value: &Option<String>, line_break: bool) -> String {
    match non_empty(value) {
        Some(text) => format!(
            "<p><strong>{}：</strong>{}{}</p>",
            label,
            if line_break { "<br>" } else { "" },
            escape_html(text)
        ),
        None => String::new(),
    }
}

fn word_body(word: &Word) -> String {
    format!(
        concat!(
            r#"<div class="detail-content">"#,
            r#"<h2>{word} <small class="phonetic">{phonetic}</small></h2>"#,
            "<p><strong>释义：</strong>{meaning}</p>",
            "<p><strong>词性：</strong>{pos}</p>",
            r#"<p><strong>难度：</strong><span class="difficulty {difficulty}">{difficulty_label}</span></p>"#,
            "{example}{translation}{category}{notes}",
            "<p><strong>复习次数：</strong>{review_count}</p>",
            "</div>"
        ),
        word = escape_html(&word.word),
        phonetic = escape_opt(&word.phonetic),
        meaning = escape_html(&word.meaning),
        pos = non_empty(&word.part_of_speech)
            .map(escape_html)
            .unwrap_or_else(|| "-".to_string()),
        difficulty = word.difficulty.as_str(),
        difficulty_label = word.difficulty.label(),
        example = optional_line("例句", &word.example_sentence, true),
        translation = optional_line("翻译", &word.example_translation, true),
        category = optional_line("分类", &word.category, false),
        notes = optional_line("备注", &word.notes, false),
        review_count = word.review_count,
    )
}

fn sentence_body(sentence: &Sentence) -> String {
    format!(
        concat!(
            r#"<div class="detail-content">"#,
            r#"<h3>英文</h3><p class="english">{english}</p>"#,
            r#"<h3>中文翻译</h3><p class="chinese">{chinese}</p>"#,
            "<p><strong>类型：</strong>{type_label}</p>",
            "{keywords}{grammar_points}{notes}",
            "</div>"
        ),
        english = escape_html(&sentence.english),
        chinese = escape_html(&sentence.chinese),
        type_label = sentence.sentence_type.label(),
        keywords = optional_line("关键词", &sentence.keywords, false),
        grammar_points = optional_line("语法要点", &sentence.grammar_points, true),
        notes = optional_line("备注", &sentence.notes, false),
    )
}

fn optional_section(heading: &str, class: &str, value: &Option<String>) -> String {
    match non_empty(value) {
        Some(text) => format!(
            r#"<h3>{}</h3><p class="{}">{}</p>"#,
            heading,
            class,
            escape_html(text)
        ),
        None => String::new(),
    }
}

fn grammar_body(grammar: &GrammarPoint) -> String {
    let examples: String = grammar
        .examples
        .iter()
        .map(|example| format!("<li>{}</li>", escape_html(example)))
        .collect();
    format!(
        concat!(
            r#"<div class="detail-content">"#,
            "<h2>{title}</h2>",
            r#"<div class="structure">{structure}</div>"#,
            "<h3>详细解释</h3><p>{explanation}</p>",
            "{usage}",
            "<h3>例句</h3><ul>{examples}</ul>",
            "{mistakes}{tips}",
            "</div>"
        ),
        title = escape_html(&grammar.title),
        structure = escape_html(&grammar.structure),
        explanation = escape_html(&grammar.explanation),
        usage = optional_section("用法说明", "usage", &grammar.usage),
        examples = examples,
        mistakes = optional_section("常见错误", "mistakes", &grammar.common_mistakes),
        tips = optional_section("学习技巧", "tips", &grammar.tips),
    )
}

/// 詳細モーダルの本文。取得した JSON を種別ごとの型で読む。
pub fn detail_body(kind: EntityKind, entity: &serde_json::Value) -> Result<String, serde_json::Error> {
    Ok(match kind {
        EntityKind::Word => word_body(&serde_json::from_value(entity.clone())?),
        EntityKind::Sentence => sentence_body(&serde_json::from_value(entity.clone())?),
        EntityKind::Grammar => grammar_body(&serde_json::from_value(entity.clone())?),
    })
}
