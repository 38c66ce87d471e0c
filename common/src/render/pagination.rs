use crate::types::EntityKind;

fn page_button(kind: EntityKind, target: i64, label: &str, class: &str, disabled: bool) -> String {
    format!(
        r#"<button class="{}" data-action="change-page" data-list="{}" data-page="{}"{}>{}</button>"#,
        class,
        kind.as_str(),
        target,
        if disabled { " disabled" } else { "" },
        label
    )
}

/// ページ送り。総ページ数が1以下なら空文字列。
///
/// 番号は先頭、末尾、現在ページの前後2ページを表示し、
/// その外側ちょうど3ページ目に省略記号を置く。
pub fn pagination(kind: EntityKind, current: u32, total: u64, page_size: u32) -> String {
    let size = u64::from(page_size.max(1));
    let pages = total.div_ceil(size) as i64;
    if pages <= 1 {
        return String::new();
    }
    let current = i64::from(current);

    let mut html = page_button(kind, current - 1, "上一页", "", current <= 1);
    for i in 1..=pages {
        if i == 1 || i == pages || (i >= current - 2 && i <= current + 2) {
            let class = if i == current { "active" } else { "" };
            html.push_str(&page_button(kind, i, &i.to_string(), class, false));
        } else if i == current - 3 || i == current + 3 {
            html.push_str("<span>...</span>");
        }
    }
    html.push_str(&page_button(kind, current + 1, "下一页", "", current >= pages));
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(html: &str) -> Vec<String> {
        html.split("</button>")
            .filter_map(|chunk| chunk.rsplit('>').next())
            .filter(|label| label.chars().all(|c| c.is_ascii_digit()) && !label.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_single_page_renders_nothing() {
        for total in 0..20 {
            assert_eq!(pagination(EntityKind::Word, 1, total, 20), "", "total={}", total);
        }
        assert_eq!(pagination(EntityKind::Word, 1, 20, 20), "");
    }

    #[test]
    fn test_three_pages_on_first() {
        let html = pagination(EntityKind::Sentence, 1, 41, 20);
        assert_eq!(numbers(&html), vec!["1", "2", "3"]);
        assert!(html.contains(r#"data-page="0" disabled>上一页"#));
        assert!(html.contains(r#"data-page="2">下一页"#));
        assert!(html.contains(r#"<button class="active" data-action="change-page" data-list="sentence" data-page="1">1</button>"#));
        assert!(!html.contains("..."));
    }

    #[test]
    fn test_next_disabled_on_last_page() {
        let html = pagination(EntityKind::Grammar, 3, 41, 20);
        assert!(html.contains(r#"data-page="4" disabled>下一页"#));
        assert!(html.contains(r#"data-page="2">上一页"#));
    }

    #[test]
    fn test_ellipsis_around_window() {
        // 10ページ中の5ページ目: 1 2 3 4 5 6 7 ... 10
        let html = pagination(EntityKind::Word, 5, 200, 20);
        assert_eq!(numbers(&html), vec!["1", "3", "4", "5", "6", "7", "10"]);
        assert_eq!(html.matches("<span>...</span>").count(), 2);
    }

    #[test]
    fn test_ellipsis_skipped_when_numbered() {
        // 4ページ目では current-3 = 1 が番号として出るので省略記号は右側のみ
        let html = pagination(EntityKind::Word, 4, 200, 20);
        assert_eq!(numbers(&html), vec!["1", "2", "3", "4", "5", "6", "10"]);
        assert_eq!(html.matches("<span>...</span>").count(), 1);
    }

    #[test]
    fn test_page_size_from_config() {
        assert_eq!(pagination(EntityKind::Word, 1, 10, 10), "");
        assert!(!pagination(EntityKind::Word, 1, 11, 10).is_empty());
    }
}
