use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalToolError {
    #[error(transparent)]
    Common(#[from] convo_eval_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("CSVファイルが見つかりません: {0}。`convo-eval annotate <CSV>` でファイルを指定してください")]
    DatasetNotFound(PathBuf),

    #[error("評価ファイルが見つかりません: {0}")]
    EvaluationsNotFound(PathBuf),

    #[error("まだ評価がありません。保存するものがありません")]
    NothingToExport,

    #[error("エクスポートに失敗: {path}: {source}")]
    ExportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("ログ初期化エラー: {0}")]
    Logging(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EvalToolError>;
