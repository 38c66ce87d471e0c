//! 作成・編集モーダルのフォーム定義と送信データの組み立て

use serde_json::{Map, Value};

use crate::error::FormError;
use crate::types::EntityKind;

/// 入力部品の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Text { placeholder: &'static str },
    TextArea { rows: u8 },
    /// (値, 表示名) の選択肢
    Select { options: &'static [(&'static str, &'static str)] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub control: Control,
    /// 新規作成時の初期値
    pub default: &'static str,
}

const fn text(name: &'static str, label: &'static str, required: bool, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required,
        control: Control::Text { placeholder },
        default: "",
    }
}

const fn area(name: &'static str, label: &'static str, required: bool, rows: u8) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required,
        control: Control::TextArea { rows },
        default: "",
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: false,
        control: Control::Select { options },
        default,
    }
}

const WORD_DIFFICULTIES: &[(&str, &str)] = &[("easy", "简单"), ("medium", "中等"), ("hard", "困难")];

const SENTENCE_TYPES: &[(&str, &str)] = &[
    ("translation", "翻译练习"),
    ("daily", "日常用语"),
    ("business", "商务英语"),
    ("academic", "学术英语"),
    ("slang", "俚语"),
    ("quote", "名言"),
];

const GRAMMAR_DIFFICULTIES: &[(&str, &str)] = &[
    ("beginner", "初级"),
    ("intermediate", "中级"),
    ("advanced", "高级"),
];

const WORD_FIELDS: &[FieldSpec] = &[
    text("word", "单词", true, ""),
    text("phonetic", "音标", false, "/ˈɪŋɡlɪʃ/"),
    text("meaning", "中文释义", true, ""),
    text("part_of_speech", "词性", false, "n. / v. / adj."),
    select("difficulty", "难度", WORD_DIFFICULTIES, "medium"),
    area("example_sentence", "例句", false, 2),
    area("example_translation", "例句翻译", false, 2),
    text("category", "分类", false, "如：四六级、雅思、托福"),
    area("notes", "备注", false, 2),
];

const SENTENCE_FIELDS: &[FieldSpec] = &[
    area("english", "英文句子", true, 3),
    area("chinese", "中文翻译", true, 3),
    select("sentence_type", "类型", SENTENCE_TYPES, "translation"),
    text("keywords", "关键词", false, "用逗号分隔"),
    area("grammar_points", "语法要点", false, 2),
    area("notes", "备注", false, 2),
];

const GRAMMAR_FIELDS: &[FieldSpec] = &[
    text("title", "语法标题", true, ""),
    text("structure", "语法结构", true, "如：Subject + Verb + Object"),
    area("explanation", "详细解释", true, 4),
    area("usage", "用法说明", false, 3),
    select("difficulty", "难度", GRAMMAR_DIFFICULTIES, "intermediate"),
    text("category", "分类", false, "如：时态、从句、虚拟语气"),
    area("common_mistakes", "常见错误", false, 2),
    area("tips", "学习技巧", false, 2),
];

/// 種別ごとのフィールド一覧
pub fn fields(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Word => WORD_FIELDS,
        EntityKind::Sentence => SENTENCE_FIELDS,
        EntityKind::Grammar => GRAMMAR_FIELDS,
    }
}

/// モーダルのタイトル（作成 / 編集）
pub fn modal_title(kind: EntityKind, editing: bool) -> &'static str {
    match (kind, editing) {
        (EntityKind::Word, false) => "添加单词",
        (EntityKind::Word, true) => "编辑单词",
        (EntityKind::Sentence, false) => "添加句子",
        (EntityKind::Sentence, true) => "编辑句子",
        (EntityKind::Grammar, false) => "添加语法",
        (EntityKind::Grammar, true) => "编辑语法",
    }
}

/// 値を埋めたフォーム。描画は `render::form`。
#[derive(Debug, Clone, PartialEq)]
pub struct FormTemplate {
    pub kind: EntityKind,
    pub values: Vec<(&'static FieldSpec, String)>,
}

impl FormTemplate {
    /// 新規作成用（初期値のみ）
    pub fn empty(kind: EntityKind) -> Self {
        Self {
            kind,
            values: fields(kind)
                .iter()
                .map(|field| (field, field.default.to_string()))
                .collect(),
        }
    }

    /// 既存エンティティの JSON から各フィールドを埋める
    pub fn prefilled(kind: EntityKind, entity: &Value) -> Self {
        Self {
            kind,
            values: fields(kind)
                .iter()
                .map(|field| (field, field_value(entity.get(field.name), field.default)))
                .collect(),
        }
    }

    /// 現在値を (name, value) で返す
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(field, value)| (field.name.to_string(), value.clone()))
            .collect()
    }
}

fn field_value(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) => String::new(),
        None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

/// 必須項目の空欄チェック。最初に見つかった空欄を返す。
pub fn check_required(kind: EntityKind, pairs: &[(String, String)]) -> Result<(), FormError> {
    for field in fields(kind).iter().filter(|f| f.required) {
        let filled = pairs
            .iter()
            .any(|(name, value)| name == field.name && !value.trim().is_empty());
        if !filled {
            return Err(FormError::MissingRequired(field.label));
        }
    }
    Ok(())
}

/// 配列として送るフィールド名（改行区切りの入力を行ごとに分割する）
pub const LIST_FIELD: &str = "examples";

/// 名前付きフィールドを送信用の JSON オブジェクトにする
pub fn serialize_form(pairs: &[(String, String)]) -> Value {
    let mut body = Map::new();
    for (name, value) in pairs {
        let value = if name == LIST_FIELD {
            Value::Array(
                value
                    .split('\n')
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| Value::String(line.to_string()))
                    .collect(),
            )
        } else {
            Value::String(value.clone())
        };
        body.insert(name.clone(), value);
    }
    Value::Object(body)
}
