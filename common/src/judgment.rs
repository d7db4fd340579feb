//! 評価値の型定義
//!
//! 2種類の評価ツールで共有される判定値:
//! - `bool`: True/False 判定
//! - `Rating`: 1〜5 のリッカート尺度
//!
//! どちらも `Judgment` トレイトを実装し、ストア・セッション・エクスポートは
//! このトレイトに対してジェネリックに書かれている。

use crate::error::Error;
use crate::store::EvaluationStore;
use crate::summary::{BinarySummary, LikertSummary, Summary};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 評価ツールの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    /// True/False 判定
    #[default]
    Binary,
    /// 1〜5 リッカート尺度
    Likert,
}

impl EvalMode {
    /// JSONエクスポートのファイル名プレフィックス
    pub fn json_prefix(&self) -> &'static str {
        match self {
            EvalMode::Binary => "conversation_evaluations",
            EvalMode::Likert => "conversation_evaluations_likert",
        }
    }

    /// CSVエクスポートのファイル名プレフィックス
    pub fn csv_prefix(&self) -> &'static str {
        match self {
            EvalMode::Binary => "conversation_evaluations",
            EvalMode::Likert => "likert_eval",
        }
    }

    /// CSVの評価列の見出し
    pub fn judgment_column(&self) -> &'static str {
        match self {
            EvalMode::Binary => "evaluation",
            EvalMode::Likert => "likert_rating",
        }
    }

    /// 評価クリア操作をデフォルトで表示するか
    pub fn surfaces_clear(&self) -> bool {
        matches!(self, EvalMode::Likert)
    }

    pub fn title(&self) -> &'static str {
        match self {
            EvalMode::Binary => "Conversation Turn Evaluator",
            EvalMode::Likert => "Continuous Scale Conversation Evaluator",
        }
    }

    /// 評価時の設問
    pub fn question(&self) -> &'static str {
        match self {
            EvalMode::Binary => "Is Person B's answer consistent, truthful, or appropriate?",
            EvalMode::Likert => {
                "Rate Person B's answer on consistency, truthfulness, and appropriateness:"
            }
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalMode::Binary => write!(f, "binary"),
            EvalMode::Likert => write!(f, "likert"),
        }
    }
}

impl std::str::FromStr for EvalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" | "bool" | "tf" => Ok(EvalMode::Binary),
            "likert" | "rating" | "continuous" => Ok(EvalMode::Likert),
            _ => Err(format!("Unknown mode: {}. Use binary or likert", s)),
        }
    }
}

/// 表示色の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Negative,
    Neutral,
    Positive,
    /// 未評価
    Unset,
}

impl Tone {
    pub fn of<J: Judgment>(value: Option<J>) -> Self {
        value.map_or(Tone::Unset, |v| v.tone())
    }
}

/// 1〜5 の評価値
///
/// `Rating::new` を通してのみ生成できるため、範囲外の値は存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Rating(value))
    }

    /// 1〜5 を昇順で返す
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn emoji(&self) -> &'static str {
        match self.0 {
            1 => "😞",
            2 => "😕",
            3 => "😐",
            4 => "😊",
            _ => "😍",
        }
    }

    /// 評価ガイドの見出し
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Very Poor",
            2 => "Poor",
            3 => "Neutral/Average",
            4 => "Good",
            _ => "Excellent",
        }
    }

    /// 評価ガイドの説明文
    pub fn description(&self) -> &'static str {
        match self.0 {
            1 => "Completely inappropriate, false, or inconsistent",
            2 => "Mostly inappropriate or inconsistent",
            3 => "Somewhat appropriate, mixed quality",
            4 => "Mostly appropriate and consistent",
            _ => "Completely appropriate, truthful, and consistent",
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Rating::new)
            .ok_or(Error::InvalidRating(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 評価値として扱える型
pub trait Judgment: Copy + PartialEq + fmt::Debug + Serialize + DeserializeOwned {
    const MODE: EvalMode;

    /// 選択肢（表示順）
    fn choices() -> Vec<Self>;

    /// ボタン表示用ラベル
    fn choice_label(&self) -> String;

    /// 現在の評価の表示用ラベル
    fn status_label(&self) -> String;

    /// CSVセルの値
    fn csv_field(&self) -> String;

    fn tone(&self) -> Tone;

    fn summarize(total: usize, store: &EvaluationStore<Self>) -> Summary;
}

impl Judgment for bool {
    const MODE: EvalMode = EvalMode::Binary;

    fn choices() -> Vec<Self> {
        vec![true, false]
    }

    fn choice_label(&self) -> String {
        let text = if *self { "✅ True" } else { "❌ False" };
        text.to_string()
    }

    fn status_label(&self) -> String {
        let text = if *self { "True ✅" } else { "False ❌" };
        text.to_string()
    }

    fn csv_field(&self) -> String {
        let text = if *self { "True" } else { "False" };
        text.to_string()
    }

    fn tone(&self) -> Tone {
        if *self {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }

    fn summarize(total: usize, store: &EvaluationStore<Self>) -> Summary {
        Summary::Binary(BinarySummary::compute(total, store))
    }
}

impl Judgment for Rating {
    const MODE: EvalMode = EvalMode::Likert;

    fn choices() -> Vec<Self> {
        Rating::all().collect()
    }

    fn choice_label(&self) -> String {
        format!("{} {}", self.emoji(), self.0)
    }

    fn status_label(&self) -> String {
        format!("{} Rating: {}", self.emoji(), self.0)
    }

    fn csv_field(&self) -> String {
        self.0.to_string()
    }

    fn tone(&self) -> Tone {
        match self.0 {
            1 | 2 => Tone::Negative,
            3 => Tone::Neutral,
            _ => Tone::Positive,
        }
    }

    fn summarize(total: usize, store: &EvaluationStore<Self>) -> Summary {
        Summary::Likert(LikertSummary::compute(total, store))
    }
}
