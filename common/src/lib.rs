//! Conversation Evaluation Common Library
//!
//! CLIとデスクトップ版で共有される評価セッションの状態モデル
//!
//! - `dataset`: CSV読み込みとスキーマ検証
//! - `store`: 評価・メモのストア
//! - `navigator`: 現在行の移動
//! - `session`: 上記をまとめた状態と操作
//! - `summary`: 集計
//! - `export`: JSON/CSVエクスポート

pub mod dataset;
pub mod error;
pub mod export;
pub mod judgment;
pub mod navigator;
pub mod session;
pub mod store;
pub mod summary;

/// 評価画面の上部に表示する背景情報（既定値）
pub const DEFAULT_BACKGROUND: &str = "\
Known Facts about PersonB:
- Favorite flavor: Strawberry
- Least favorite flavor: Mint chip
- Allergic to: Nuts
- Most commonly eats: Strawberry ice cream
- Dislikes: Rocky road, mint chip
- Neutral about: Cookies and cream";

pub use dataset::{Dataset, Row};
pub use error::{Error, Result};
pub use judgment::{EvalMode, Judgment, Rating, Tone};
pub use navigator::{NavOutcome, Navigator};
pub use session::{Action, Outcome, Session};
pub use store::{EvaluationStore, NotesStore};
pub use summary::{format_stat, BinarySummary, LikertSummary, RatingStats, Summary};
