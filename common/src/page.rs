//! ナビゲーション対象のページ

use crate::types::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Words,
    Sentences,
    Grammar,
    Review,
    Statistics,
    Search,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Words,
        Page::Sentences,
        Page::Grammar,
        Page::Review,
        Page::Statistics,
        Page::Search,
    ];

    /// DOM の `data-page` 属性とページ要素の id
    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Words => "words",
            Page::Sentences => "sentences",
            Page::Grammar => "grammar",
            Page::Review => "review",
            Page::Statistics => "statistics",
            Page::Search => "search",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "仪表盘",
            Page::Words => "单词管理",
            Page::Sentences => "句子翻译",
            Page::Grammar => "语法结构",
            Page::Review => "复习中心",
            Page::Statistics => "数据统计",
            Page::Search => "搜索",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.key() == key)
    }

    /// 一覧ページなら、その一覧が表示するエンティティ種別
    pub fn list_kind(&self) -> Option<EntityKind> {
        match self {
            Page::Words => Some(EntityKind::Word),
            Page::Sentences => Some(EntityKind::Sentence),
            Page::Grammar => Some(EntityKind::Grammar),
            _ => None,
        }
    }
}

impl From<EntityKind> for Page {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Word => Page::Words,
            EntityKind::Sentence => Page::Sentences,
            EntityKind::Grammar => Page::Grammar,
        }
    }
}
