//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must contain columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV contains no conversation turns")]
    EmptyDataset,

    #[error("duplicate turn_id: {0}")]
    DuplicateTurnId(String),

    #[error("rating out of range 1-5: {0}")]
    InvalidRating(i64),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
