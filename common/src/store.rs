//! 評価ストア・メモストア
//!
//! どちらも turn_id をキーとする挿入順マップ。
//! 評価とメモは独立しており、片方だけ存在してもよい。

use crate::dataset::Dataset;
use crate::error::Result;
use crate::judgment::Judgment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// turn_id → 評価値
///
/// 値が `None` のエントリは「明示的にクリアされた」状態で、
/// JSONには `null` として出力される。未評価扱いなのはエントリ無しと同じ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "J: Serialize", deserialize = "J: Judgment"))]
pub struct EvaluationStore<J> {
    entries: IndexMap<String, Option<J>>,
}

impl<J> Default for EvaluationStore<J> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<J: Judgment> EvaluationStore<J> {
    pub fn new() -> Self {
        Self::default()
    }

    /// エクスポート済みJSONから復元
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 評価を設定（既存の値は上書き）
    pub fn set(&mut self, turn_id: &str, value: J) {
        self.entries.insert(turn_id.to_string(), Some(value));
    }

    /// 評価をクリア
    pub fn clear(&mut self, turn_id: &str) {
        self.entries.insert(turn_id.to_string(), None);
    }

    pub fn get(&self, turn_id: &str) -> Option<J> {
        self.entries.get(turn_id).copied().flatten()
    }

    pub fn is_evaluated(&self, turn_id: &str) -> bool {
        self.get(turn_id).is_some()
    }

    /// 評価済み件数（クリア済みエントリは数えない）
    pub fn evaluated_count(&self) -> usize {
        self.values().count()
    }

    /// 評価済みの値を挿入順で返す
    pub fn values(&self) -> impl Iterator<Item = J> + '_ {
        self.entries.values().filter_map(|v| *v)
    }

    /// クリア済みを含む全エントリ
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<J>)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// エントリ数（クリア済みを含む）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 別ストアの内容を取り込む
    ///
    /// データセットに存在しない turn_id は取り込まず、その一覧を返す。
    pub fn merge(&mut self, other: EvaluationStore<J>, dataset: &Dataset) -> Vec<String> {
        let mut unknown = Vec::new();
        for (turn_id, value) in other.entries {
            if dataset.contains(&turn_id) {
                self.entries.insert(turn_id, value);
            } else {
                unknown.push(turn_id);
            }
        }
        if !unknown.is_empty() {
            tracing::warn!(count = unknown.len(), "ignored evaluations for unknown turn ids");
        }
        unknown
    }
}

/// turn_id → メモ（未設定は空文字列）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotesStore {
    notes: IndexMap<String, String>,
}

impl NotesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// メモを取得（未設定なら空文字列）
    pub fn get(&self, turn_id: &str) -> &str {
        self.notes.get(turn_id).map(String::as_str).unwrap_or("")
    }

    /// 行を初めて表示したときに空のメモを用意する
    pub fn touch(&mut self, turn_id: &str) -> &mut String {
        self.notes.entry(turn_id.to_string()).or_default()
    }

    pub fn set(&mut self, turn_id: &str, text: impl Into<String>) {
        self.notes.insert(turn_id.to_string(), text.into());
    }

    /// 空でないメモの件数
    pub fn written_count(&self) -> usize {
        self.notes.values().filter(|n| !n.trim().is_empty()).count()
    }
}
