//! 一覧・復習・統計・ダッシュボード・検索の取得テスト

mod support;

use futures::executor::block_on;
use futures::future::join;
use lingo_common::store::ReviewFilter;
use lingo_common::{ChartCanvas, ChartHandle, Counter, EntityKind, FilterControl, Page, Region, ToastKind};
use serde_json::json;
use support::{dashboard, transport, Event};

fn words_page(ids: &[u64], count: u64) -> String {
    let results: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": id, "word": format!("word-{}", id), "meaning": "意味", "difficulty": "easy"}))
        .collect();
    json!({"results": results, "count": count}).to_string()
}

/// 一覧ページへ遷移すると1ページ目を取得して表とページ送りを描く
#[test]
fn test_navigate_to_words_loads_first_page() {
    let d = dashboard();
    transport(&d).reply(200, &words_page(&[1, 2], 41));

    block_on(d.navigate_to(Page::Words));

    assert_eq!(transport(&d).calls(), vec!["GET /api/words/?page=1"]);
    let events = d.view().events();
    assert_eq!(events[0], Event::Activate(Page::Words));
    assert_eq!(events[1], Event::Title("单词管理".into()));

    let table = d.view().last_html(Region::WordsTable).unwrap();
    assert!(table.contains("word-1") && table.contains("word-2"));
    let pagination = d.view().last_html(Region::Pagination(EntityKind::Word)).unwrap();
    assert!(pagination.contains("上一页"));
    assert!(pagination.contains(r#"data-page="3">3</button>"#));
    assert_eq!(d.store().pagination(EntityKind::Word).total, 41);
}

/// 素の配列とページング形式で同じ描画になる
#[test]
fn test_bare_array_renders_like_envelope() {
    let items = json!([
        {"id": 1, "english": "Hi", "chinese": "你好"},
        {"id": 2, "english": "Bye", "chinese": "再见"},
        {"id": 3, "english": "Yes", "chinese": "是"},
        {"id": 4, "english": "No", "chinese": "不"},
        {"id": 5, "english": "OK", "chinese": "好"}
    ]);

    let bare = dashboard();
    transport(&bare).reply_json(items.clone());
    block_on(bare.load_sentences());

    let paged = dashboard();
    transport(&paged).reply_json(json!({"results": items, "count": 5}));
    block_on(paged.load_sentences());

    assert_eq!(
        bare.view().html(Region::SentencesGrid),
        paged.view().html(Region::SentencesGrid)
    );
    assert_eq!(
        bare.view().html(Region::Pagination(EntityKind::Sentence)),
        vec![String::new()]
    );
    assert_eq!(bare.store().pagination(EntityKind::Sentence).total, 5);
    assert_eq!(paged.store().pagination(EntityKind::Sentence).total, 5);
}

/// count が 0 のときは件数で代用する
#[test]
fn test_zero_count_falls_back_to_length() {
    let d = dashboard();
    transport(&d).reply(200, &words_page(&[1, 2, 3], 0));
    block_on(d.load_words());
    assert_eq!(d.store().pagination(EntityKind::Word).total, 3);
}

/// count のないページング形式も受け付け、件数で総数を代用する
#[test]
fn test_results_without_count_loads_list() {
    let d = dashboard();
    transport(&d).reply_json(json!({"results": [{"id": 1, "word": "cat"}, {"id": 2, "word": "dog"}]}));
    block_on(d.load_words());

    assert!(d.view().toasts().is_empty());
    assert_eq!(d.store().words().len(), 2);
    assert_eq!(d.store().pagination(EntityKind::Word).total, 2);
    assert!(d.view().last_html(Region::WordsTable).unwrap().contains("cat"));
}

/// 404 ならエラートーストを出し、表は以前のまま
#[test]
fn test_load_words_404_keeps_previous_table() {
    let d = dashboard();
    transport(&d).reply(200, &words_page(&[1], 1));
    block_on(d.load_words());
    let before = d.view().html(Region::WordsTable);

    transport(&d).reply(404, r#"{"detail": "Not found."}"#);
    block_on(d.load_words());

    assert_eq!(
        d.view().toasts(),
        vec![(ToastKind::Error, "请求失败".to_string(), "HTTP 404: Not Found".to_string())]
    );
    assert_eq!(d.view().html(Region::WordsTable), before);
    assert_eq!(d.store().words().len(), 1);
}

/// 通信失敗もトースト1回、描画なし
#[test]
fn test_network_failure_toasts_once() {
    let d = dashboard();
    transport(&d).fail("connection refused");
    block_on(d.load_grammar());

    let toasts = d.view().toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].2, "connection refused");
    assert!(d.view().html(Region::GrammarGrid).is_empty());
}

/// 絞り込みを変えるとページが1に戻る
#[test]
fn test_filter_change_resets_page() {
    let d = dashboard();
    transport(&d).reply(200, &words_page(&[1], 100));
    block_on(d.change_page(EntityKind::Word, 3));
    transport(&d).reply(200, &words_page(&[1], 1));
    block_on(d.set_filter(FilterControl::WordSearch, "cat"));
    transport(&d).reply(200, &words_page(&[1], 1));
    block_on(d.set_filter(FilterControl::WordFavorite, "true"));

    assert_eq!(
        transport(&d).calls(),
        vec![
            "GET /api/words/?page=3",
            "GET /api/words/?page=1&search=cat",
            "GET /api/words/?page=1&search=cat&is_favorite=true",
        ]
    );
}

#[test]
fn test_change_page_below_one_is_ignored() {
    let d = dashboard();
    block_on(d.change_page(EntityKind::Grammar, 0));
    assert!(transport(&d).requests().is_empty());
    assert_eq!(d.store().pagination(EntityKind::Grammar).page, 1);
}

/// 後から発行した取得の結果だけを採用する
#[test]
fn test_stale_response_is_discarded() {
    let d = dashboard();
    transport(&d).reply_delayed(3, 200, &words_page(&[1], 1));
    transport(&d).reply(200, &words_page(&[2], 1));

    block_on(join(d.load_words(), d.load_words()));

    let tables = d.view().html(Region::WordsTable);
    assert_eq!(tables.len(), 1);
    assert!(tables[0].contains("word-2"));
    assert_eq!(d.store().words()[0].id, 2);
}

/// ビジー表示は最後のリクエストが終わったときだけ消える
#[test]
fn test_busy_indicator_is_reference_counted() {
    let d = dashboard();
    transport(&d).reply_delayed(3, 200, &words_page(&[1], 1));
    transport(&d).reply(200, "[]");

    block_on(join(d.load_words(), d.load_sentences()));

    assert_eq!(d.view().busy(), vec![true, false]);
    assert_eq!(d.gateway().in_flight(), 0);
}

/// 復習キューは件数バッジを更新し、種別フィルタは再取得しない
#[test]
fn test_review_queue_and_filter() {
    let d = dashboard();
    transport(&d).reply_json(json!([
        {"type": "word", "id": 1, "title": "cat", "review_count": 0, "last_reviewed": null},
        {"type": "grammar", "id": 9, "title": "虚拟语气", "review_count": 2,
         "last_reviewed": "2024-03-05T10:20:30+08:00"},
        {"type": "sentence", "id": 4, "title": "Hello there", "review_count": 1, "last_reviewed": null}
    ]));

    block_on(d.navigate_to(Page::Review));
    assert_eq!(d.view().counter(Counter::ReviewCount), Some(3));
    let list = d.view().last_html(Region::ReviewList).unwrap();
    assert!(list.contains("上次复习: 2024/3/5"));

    d.filter_review(ReviewFilter::Only(EntityKind::Grammar));
    let filtered = d.view().last_html(Region::ReviewList).unwrap();
    assert!(filtered.contains("虚拟语气"));
    assert!(!filtered.contains("cat"));
    assert_eq!(transport(&d).requests().len(), 1);
}

/// 復習フィルタは再取得後も維持される
#[test]
fn test_review_filter_survives_reload() {
    let d = dashboard();
    d.filter_review(ReviewFilter::Only(EntityKind::Word));
    transport(&d).reply_json(json!([
        {"type": "word", "id": 1, "title": "cat"},
        {"type": "sentence", "id": 4, "title": "Hello there"}
    ]));
    block_on(d.load_review_items());

    let list = d.view().last_html(Region::ReviewList).unwrap();
    assert!(list.contains("cat"));
    assert!(!list.contains("Hello there"));
    assert_eq!(d.view().counter(Counter::ReviewCount), Some(2));
}

#[test]
fn test_dashboard_counters_and_badge() {
    let d = dashboard();
    transport(&d).reply_json(json!({
        "total_words": 10, "total_sentences": 5, "total_grammar": 2,
        "today_words": 1, "today_sentences": 0, "today_grammar": 0,
        "favorite_words": 3, "favorite_sentences": 1, "mastered_grammar": 1,
        "study_streak": 4,
        "recent_activities": [{"type": "word", "action": "添加了单词: cat", "time": "2024-03-05 10:20"}]
    }));

    block_on(d.start());

    assert_eq!(transport(&d).calls(), vec!["GET /api/dashboard/"]);
    assert_eq!(d.view().counter(Counter::TotalWords), Some(10));
    assert_eq!(d.view().counter(Counter::StreakDays), Some(4));
    assert_eq!(d.view().counter(Counter::ToReview), Some(17));
    assert_eq!(d.view().counter(Counter::ReviewBadge), Some(17));
    let activity = d.view().last_html(Region::ActivityList).unwrap();
    assert!(activity.contains("添加了单词: cat"));
}

/// 統計の再表示では古いチャートを破棄してから描く
#[test]
fn test_statistics_redraw_destroys_charts() {
    let d = dashboard();
    let stats = json!({
        "word_by_difficulty": [{"difficulty": "easy", "count": 3}],
        "sentence_by_type": [],
        "grammar_by_difficulty": [],
        "last_7_days": [{"date": "03-05", "words": 1, "sentences": 0, "grammar": 0}]
    });
    transport(&d).reply_json(stats.clone());
    block_on(d.navigate_to(Page::Statistics));
    transport(&d).reply_json(stats);
    block_on(d.navigate_to(Page::Statistics));

    let chart_events: Vec<Event> = d
        .view()
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::DrawChart(..) | Event::DestroyChart(_)))
        .collect();
    assert_eq!(chart_events.len(), 12);
    assert_eq!(chart_events[0], Event::DrawChart(ChartCanvas::WordDifficulty, ChartHandle(1)));
    assert_eq!(chart_events[4], Event::DestroyChart(ChartHandle(1)));
    assert_eq!(chart_events[7], Event::DestroyChart(ChartHandle(4)));
    assert_eq!(chart_events[8], Event::DrawChart(ChartCanvas::WordDifficulty, ChartHandle(5)));
    assert_eq!(d.store().charts().len(), 4);
}

#[test]
fn test_blank_search_does_nothing() {
    let d = dashboard();
    block_on(d.perform_search("   "));
    assert!(transport(&d).requests().is_empty());
    assert!(d.view().events().is_empty());
}

#[test]
fn test_search_switches_page_and_renders() {
    let d = dashboard();
    transport(&d).reply_json(json!({
        "words": [{"id": 1, "word": "take off", "meaning": "起飞", "difficulty": "medium"}],
        "sentences": [],
        "grammar": []
    }));

    block_on(d.perform_search("  take off "));

    assert_eq!(transport(&d).calls(), vec!["GET /api/search/?q=take%20off"]);
    assert_eq!(d.view().events()[0], Event::Activate(Page::Search));
    assert_eq!(d.store().current_page(), Page::Search);
    let panel = d.view().last_html(Region::SearchResults).unwrap();
    assert!(panel.contains("单词 (1)"));
}

#[test]
fn test_search_without_hits_shows_placeholder() {
    let d = dashboard();
    transport(&d).reply_json(json!({"words": [], "sentences": [], "grammar": []}));
    block_on(d.perform_search("zzz"));
    let panel = d.view().last_html(Region::SearchResults).unwrap();
    assert_eq!(panel.matches("未找到结果").count(), 1);
}
