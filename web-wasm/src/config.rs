//! ホストページからの設定読み込み
//!
//! `<script type="application/json" id="lingo-config">` があればその中身を使う。

use lingo_common::{DashboardConfig, Error};
use web_sys::Document;

pub const CONFIG_ELEMENT: &str = "lingo-config";

/// 設定と、既定値にフォールバックした理由
pub fn load(document: &Document) -> (DashboardConfig, Option<Error>) {
    let content = document
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|el| el.text_content());
    parse(content.as_deref())
}

pub fn parse(content: Option<&str>) -> (DashboardConfig, Option<Error>) {
    match content.map(str::trim) {
        None | Some("") => (DashboardConfig::default(), None),
        Some(json) => match DashboardConfig::from_json(json) {
            Ok(config) => (config, None),
            Err(err) => (DashboardConfig::default(), Some(err)),
        },
    }
}
