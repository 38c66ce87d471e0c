//! 統計ページのチャート設定（Chart.js の config 形式）

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::Statistics;
use crate::view::ChartCanvas;

/// 週間推移の系列名
const SERIES_LABELS: [&str; 3] = ["单词", "句子", "语法"];
/// 週間推移の (線, 塗り) 色
const LINE_COLORS: [(&str, &str); 3] = [
    ("#3b82f6", "rgba(59, 130, 246, 0.1)"),
    ("#10b981", "rgba(16, 185, 129, 0.1)"),
    ("#8b5cf6", "rgba(139, 92, 246, 0.1)"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Doughnut,
    Bar,
    Pie,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: Value,
}

fn palette(colors: &[&str]) -> Colors {
    Colors::Many(colors.iter().map(|c| c.to_string()).collect())
}

fn legend_bottom() -> Value {
    json!({ "responsive": true, "plugins": { "legend": { "position": "bottom" } } })
}

/// スナップショットから4つのチャート設定を作る。描画のたびに作り直す。
pub fn build_charts(stats: &Statistics) -> Vec<(ChartCanvas, ChartConfig)> {
    let word = ChartConfig {
        chart_type: ChartType::Doughnut,
        data: ChartData {
            labels: stats
                .word_by_difficulty
                .iter()
                .map(|d| d.difficulty.label().to_string())
                .collect(),
            datasets: vec![Dataset {
                label: None,
                data: stats.word_by_difficulty.iter().map(|d| d.count).collect(),
                background_color: palette(&["#10b981", "#f59e0b", "#ef4444"]),
                border_color: None,
                fill: None,
            }],
        },
        options: legend_bottom(),
    };

    let sentence = ChartConfig {
        chart_type: ChartType::Bar,
        data: ChartData {
            labels: stats
                .sentence_by_type
                .iter()
                .map(|d| d.sentence_type.label().to_string())
                .collect(),
            datasets: vec![Dataset {
                label: Some("数量".into()),
                data: stats.sentence_by_type.iter().map(|d| d.count).collect(),
                background_color: Colors::One("#6366f1".into()),
                border_color: None,
                fill: None,
            }],
        },
        options: json!({ "responsive": true, "plugins": { "legend": { "display": false } } }),
    };

    let grammar = ChartConfig {
        chart_type: ChartType::Pie,
        data: ChartData {
            labels: stats
                .grammar_by_difficulty
                .iter()
                .map(|d| d.difficulty.label().to_string())
                .collect(),
            datasets: vec![Dataset {
                label: None,
                data: stats.grammar_by_difficulty.iter().map(|d| d.count).collect(),
                background_color: palette(&["#3b82f6", "#8b5cf6", "#ef4444"]),
                border_color: None,
                fill: None,
            }],
        },
        options: legend_bottom(),
    };

    let days = &stats.last_7_days;
    let series: [Vec<u64>; 3] = [
        days.iter().map(|d| d.words).collect(),
        days.iter().map(|d| d.sentences).collect(),
        days.iter().map(|d| d.grammar).collect(),
    ];
    let weekly = ChartConfig {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: days.iter().map(|d| d.date.clone()).collect(),
            datasets: series
                .into_iter()
                .zip(SERIES_LABELS.iter().zip(LINE_COLORS.iter()))
                .map(|(data, (label, (border, fill)))| Dataset {
                    label: Some(label.to_string()),
                    data,
                    background_color: Colors::One(fill.to_string()),
                    border_color: Some(border.to_string()),
                    fill: Some(true),
                })
                .collect(),
        },
        options: json!({
            "responsive": true,
            "plugins": { "legend": { "position": "bottom" } },
            "scales": { "y": { "beginAtZero": true } }
        }),
    };

    vec![
        (ChartCanvas::WordDifficulty, word),
        (ChartCanvas::SentenceType, sentence),
        (ChartCanvas::GrammarDifficulty, grammar),
        (ChartCanvas::Weekly, weekly),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DailyCount, Difficulty, DifficultyCount, SentenceType, SentenceTypeCount};

    fn sample() -> Statistics {
        Statistics {
            word_by_difficulty: vec![
                DifficultyCount { difficulty: Difficulty::Easy, count: 4 },
                DifficultyCount { difficulty: Difficulty::Hard, count: 1 },
            ],
            sentence_by_type: vec![SentenceTypeCount {
                sentence_type: SentenceType::Quote,
                count: 2,
            }],
            grammar_by_difficulty: vec![],
            last_7_days: vec![
                DailyCount { date: "03-01".into(), words: 1, sentences: 0, grammar: 2 },
                DailyCount { date: "03-02".into(), words: 3, sentences: 1, grammar: 0 },
            ],
        }
    }

    #[test]
    fn test_four_charts_in_canvas_order() {
        let charts = build_charts(&sample());
        let canvases: Vec<ChartCanvas> = charts.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            canvases,
            vec![
                ChartCanvas::WordDifficulty,
                ChartCanvas::SentenceType,
                ChartCanvas::GrammarDifficulty,
                ChartCanvas::Weekly
            ]
        );
    }

    #[test]
    fn test_labels_use_display_names() {
        let charts = build_charts(&sample());
        assert_eq!(charts[0].1.data.labels, vec!["简单", "困难"]);
        assert_eq!(charts[0].1.data.datasets[0].data, vec![4, 1]);
        assert_eq!(charts[1].1.data.labels, vec!["名言"]);
    }

    #[test]
    fn test_weekly_has_three_series() {
        let charts = build_charts(&sample());
        let weekly = &charts[3].1;
        assert_eq!(weekly.chart_type, ChartType::Line);
        assert_eq!(weekly.data.datasets.len(), 3);
        assert_eq!(weekly.data.datasets[2].data, vec![2, 0]);
        assert_eq!(weekly.data.datasets[0].label.as_deref(), Some("单词"));
    }

    #[test]
    fn test_serializes_chartjs_shape() {
        let charts = build_charts(&sample());
        let json = serde_json::to_value(&charts[3].1).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["datasets"][0]["borderColor"], "#3b82f6");
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        let doughnut = serde_json::to_value(&charts[0].1).unwrap();
        assert!(doughnut["data"]["datasets"][0].get("label").is_none());
        assert!(doughnut["data"]["datasets"][0]["backgroundColor"].is_array());
    }

    #[test]
    fn test_empty_statistics_still_builds() {
        let charts = build_charts(&Statistics::default());
        assert_eq!(charts.len(), 4);
        assert!(charts[3].1.data.labels.is_empty());
    }
}
