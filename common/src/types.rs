//! バックエンドとやり取りするエンティティ型
//!
//! 一覧APIは詳細専用フィールドを省略するため、任意項目はすべて
//! `#[serde(default)]` で受ける。

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 3種類の学習コンテンツ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Word,
    Sentence,
    Grammar,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Word, EntityKind::Sentence, EntityKind::Grammar];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Word => "word",
            EntityKind::Sentence => "sentence",
            EntityKind::Grammar => "grammar",
        }
    }

    /// REST コレクションのパス（`/words/` など）
    pub fn collection_path(&self) -> &'static str {
        match self {
            EntityKind::Word => "/words/",
            EntityKind::Sentence => "/sentences/",
            EntityKind::Grammar => "/grammar/",
        }
    }

    pub fn item_path(&self, id: u64) -> String {
        format!("{}{}/", self.collection_path(), id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Word => "单词",
            EntityKind::Sentence => "句子",
            EntityKind::Grammar => "语法",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EntityKind::Word => "fa-book",
            EntityKind::Sentence => "fa-comment-dots",
            EntityKind::Grammar => "fa-spell-check",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "word" => Some(EntityKind::Word),
            "sentence" => Some(EntityKind::Sentence),
            "grammar" => Some(EntityKind::Grammar),
            _ => None,
        }
    }
}

/// 単語の難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// 文の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceType {
    Translation,
    #[default]
    Daily,
    Business,
    Academic,
    Slang,
    Quote,
}

impl SentenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentenceType::Translation => "translation",
            SentenceType::Daily => "daily",
            SentenceType::Business => "business",
            SentenceType::Academic => "academic",
            SentenceType::Slang => "slang",
            SentenceType::Quote => "quote",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentenceType::Translation => "翻译练习",
            SentenceType::Daily => "日常用语",
            SentenceType::Business => "商务英语",
            SentenceType::Academic => "学术英语",
            SentenceType::Slang => "俚语",
            SentenceType::Quote => "名言",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "translation" => Some(SentenceType::Translation),
            "daily" => Some(SentenceType::Daily),
            "business" => Some(SentenceType::Business),
            "academic" => Some(SentenceType::Academic),
            "slang" => Some(SentenceType::Slang),
            "quote" => Some(SentenceType::Quote),
            _ => None,
        }
    }
}

/// 文法の難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarDifficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl GrammarDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrammarDifficulty::Beginner => "beginner",
            GrammarDifficulty::Intermediate => "intermediate",
            GrammarDifficulty::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrammarDifficulty::Beginner => "初级",
            GrammarDifficulty::Intermediate => "中级",
            GrammarDifficulty::Advanced => "高级",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(GrammarDifficulty::Beginner),
            "intermediate" => Some(GrammarDifficulty::Intermediate),
            "advanced" => Some(GrammarDifficulty::Advanced),
            _ => None,
        }
    }
}

/// 単語
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Word {
    pub id: u64,
    pub word: String,
    pub phonetic: Option<String>,
    pub meaning: String,
    pub part_of_speech: Option<String>,
    pub difficulty: Difficulty,
    pub example_sentence: Option<String>,
    pub example_translation: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub review_count: u32,
    pub is_favorite: bool,
}

/// 文と翻訳
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentence {
    pub id: u64,
    pub english: String,
    pub chinese: String,
    pub sentence_type: SentenceType,
    pub keywords: Option<String>,
    pub grammar_points: Option<String>,
    pub notes: Option<String>,
    pub review_count: u32,
    pub is_favorite: bool,
}

/// 文法項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarPoint {
    pub id: u64,
    pub title: String,
    pub structure: String,
    pub explanation: String,
    pub usage: Option<String>,
    pub difficulty: GrammarDifficulty,
    pub category: Option<String>,
    pub examples: Vec<String>,
    pub common_mistakes: Option<String>,
    pub tips: Option<String>,
    pub review_count: u32,
    pub is_mastered: bool,
}

/// 復習キューの1件（読み取り専用の射影）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<FixedOffset>>,
}

/// 最近の学習活動
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    pub time: String,
}

/// ダッシュボードの集計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub total_words: u64,
    pub total_sentences: u64,
    pub total_grammar: u64,
    pub today_words: u64,
    pub today_sentences: u64,
    pub today_grammar: u64,
    pub favorite_words: u64,
    pub favorite_sentences: u64,
    pub mastered_grammar: u64,
    pub study_streak: u64,
    pub recent_activities: Vec<Activity>,
}

impl DashboardSummary {
    /// サイドバーの「要復習」バッジに出す数
    pub fn to_review(&self) -> u64 {
        self.total_words + self.total_sentences + self.total_grammar
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCount {
    pub difficulty: Difficulty,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceTypeCount {
    pub sentence_type: SentenceType,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarDifficultyCount {
    pub difficulty: GrammarDifficulty,
    pub count: u64,
}

/// 1日分の追加件数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyCount {
    pub date: String,
    pub words: u64,
    pub sentences: u64,
    pub grammar: u64,
}

/// 統計ページのスナップショット。取得のたびに丸ごと置き換える。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub word_by_difficulty: Vec<DifficultyCount>,
    pub sentence_by_type: Vec<SentenceTypeCount>,
    pub grammar_by_difficulty: Vec<GrammarDifficultyCount>,
    pub last_7_days: Vec<DailyCount>,
}

/// 横断検索の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub words: Vec<Word>,
    pub sentences: Vec<Sentence>,
    pub grammar: Vec<GrammarPoint>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.sentences.is_empty() && self.grammar.is_empty()
    }
}

/// 一覧レスポンス。ページングあり `{results, count}`（count は省略可）と素の配列の両方を受ける。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Paged {
        results: Vec<T>,
        #[serde(default)]
        count: u64,
    },
}

impl<T> ListEnvelope<T> {
    /// ページネーションに使う総件数。count が 0 のときは件数で代用する。
    pub fn total(&self) -> u64 {
        match self {
            ListEnvelope::Paged { count, .. } if *count > 0 => *count,
            ListEnvelope::Paged { results, .. } => results.len() as u64,
            ListEnvelope::Bare(items) => items.len() as u64,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Paged { results, .. } => results,
            ListEnvelope::Bare(items) => items,
        }
    }
}

/// 空文字列を None と同じに扱う
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
