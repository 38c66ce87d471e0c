//! ダッシュボード設定

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// API のルートパス（末尾スラッシュなし）
    pub api_root: String,
    /// 1ページあたりの件数
    pub page_size: u32,
    /// 検索入力のデバウンス間隔
    pub debounce_ms: u32,
    /// トースト表示時間
    pub toast_ms: u32,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_root: "/api".into(),
            page_size: 20,
            debounce_ms: 300,
            toast_ms: 3000,
            log_level: "info".into(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: DashboardConfig = serde_json::from_str(content).map_err(Error::Config)?;
        while config.api_root.ends_with('/') {
            config.api_root.pop();
        }
        if config.page_size == 0 {
            config.page_size = Self::default().page_size;
        }
        Ok(config)
    }

    /// ルートとパスを結合したURL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
