//! 一覧の絞り込み条件とクエリ文字列の組み立て
//!
//! 値が空の条件はパラメータごと省く（`&difficulty=` のような空値は送らない）。

use crate::types::{Difficulty, EntityKind, GrammarDifficulty, SentenceType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordFilters {
    pub search: String,
    pub difficulty: Option<Difficulty>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceFilters {
    pub search: String,
    pub sentence_type: Option<SentenceType>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrammarFilters {
    pub search: String,
    pub difficulty: Option<GrammarDifficulty>,
    pub is_mastered: Option<bool>,
}

/// 3つの一覧ページの絞り込み状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub words: WordFilters,
    pub sentences: SentenceFilters,
    pub grammar: GrammarFilters,
}

/// 絞り込みコントロール（DOM の id と対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterControl {
    WordSearch,
    WordDifficulty,
    WordFavorite,
    SentenceSearch,
    SentenceType,
    GrammarSearch,
    GrammarDifficulty,
    GrammarMastered,
}

impl FilterControl {
    pub const ALL: [FilterControl; 8] = [
        FilterControl::WordSearch,
        FilterControl::WordDifficulty,
        FilterControl::WordFavorite,
        FilterControl::SentenceSearch,
        FilterControl::SentenceType,
        FilterControl::GrammarSearch,
        FilterControl::GrammarDifficulty,
        FilterControl::GrammarMastered,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            FilterControl::WordSearch => "wordSearch",
            FilterControl::WordDifficulty => "wordDifficulty",
            FilterControl::WordFavorite => "wordFavorite",
            FilterControl::SentenceSearch => "sentenceSearch",
            FilterControl::SentenceType => "sentenceType",
            FilterControl::GrammarSearch => "grammarSearch",
            FilterControl::GrammarDifficulty => "grammarDifficulty",
            FilterControl::GrammarMastered => "grammarMastered",
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            FilterControl::WordSearch | FilterControl::WordDifficulty | FilterControl::WordFavorite => {
                EntityKind::Word
            }
            FilterControl::SentenceSearch | FilterControl::SentenceType => EntityKind::Sentence,
            FilterControl::GrammarSearch
            | FilterControl::GrammarDifficulty
            | FilterControl::GrammarMastered => EntityKind::Grammar,
        }
    }

    /// 自由入力の検索欄か（入力ごとにデバウンスする）
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FilterControl::WordSearch | FilterControl::SentenceSearch | FilterControl::GrammarSearch
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl Filters {
    /// コントロールの現在値を反映する。解釈できない選択値は「指定なし」。
    pub fn apply(&mut self, control: FilterControl, value: &str) {
        match control {
            FilterControl::WordSearch => self.words.search = value.to_string(),
            FilterControl::WordDifficulty => self.words.difficulty = Difficulty::parse(value),
            FilterControl::WordFavorite => self.words.is_favorite = parse_bool(value),
            FilterControl::SentenceSearch => self.sentences.search = value.to_string(),
            FilterControl::SentenceType => self.sentences.sentence_type = SentenceType::parse(value),
            FilterControl::GrammarSearch => self.grammar.search = value.to_string(),
            FilterControl::GrammarDifficulty => {
                self.grammar.difficulty = GrammarDifficulty::parse(value)
            }
            FilterControl::GrammarMastered => self.grammar.is_mastered = parse_bool(value),
        }
    }

    /// 一覧取得のパスとクエリ（`/words/?page=1&search=cat` など）
    pub fn list_path(&self, kind: EntityKind, page: u32) -> String {
        let mut query = Query::new();
        query.push("page", &page.to_string());
        match kind {
            EntityKind::Word => {
                let f = &self.words;
                query.push_encoded("search", &f.search);
                query.push_opt("difficulty", f.difficulty.map(|d| d.as_str()));
                query.push_opt("is_favorite", f.is_favorite.map(bool_str));
            }
            EntityKind::Sentence => {
                let f = &self.sentences;
                query.push_encoded("search", &f.search);
                query.push_opt("type", f.sentence_type.map(|t| t.as_str()));
            }
            EntityKind::Grammar => {
                let f = &self.grammar;
                query.push_encoded("search", &f.search);
                query.push_opt("difficulty", f.difficulty.map(|d| d.as_str()));
                query.push_opt("is_mastered", f.is_mastered.map(bool_str));
            }
        }
        format!("{}{}", kind.collection_path(), query.finish())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// 横断検索のパス
pub fn search_path(query: &str) -> String {
    format!("/search/?q={}", urlencoding::encode(query))
}

#[derive(Debug, Default)]
struct Query {
    parts: Vec<String>,
}

impl Query {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, key: &str, value: &str) {
        self.parts.push(format!("{}={}", key, value));
    }

    fn push_encoded(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.push(key, &urlencoding::encode(value));
        }
    }

    fn push_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    fn finish(self) -> String {
        if self.parts.is_empty() {
            String::new()
        } else {
            format!("?{}", self.parts.join("&"))
        }
    }
}
