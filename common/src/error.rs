//! エラー型定義

use thiserror::Error;

/// ゲートウェイ経由のリクエスト失敗
#[derive(Error, Debug)]
pub enum ApiError {
    /// 接続失敗など、レスポンスが得られなかった
    #[error("{0}")]
    Network(String),

    /// 2xx 以外のステータス（本文は解析しない）
    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// 2xx だが本文が JSON として不正
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// フォーム送信前のエラー
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("no modal form is open")]
    NoModal,

    #[error("required field is empty: {0}")]
    MissingRequired(&'static str),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Config error: {0}")]
    Config(serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
