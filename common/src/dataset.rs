//! 会話データセット
//!
//! CSV（`turn_id`, `personA_question`, `personB_answer`）を読み込み、
//! 読み込み後は変更しない行の列として保持する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

pub const TURN_ID_COLUMN: &str = "turn_id";
pub const QUESTION_COLUMN: &str = "personA_question";
pub const ANSWER_COLUMN: &str = "personB_answer";

/// 必須列（この順で出力にも使う）
pub const REQUIRED_COLUMNS: [&str; 3] = [TURN_ID_COLUMN, QUESTION_COLUMN, ANSWER_COLUMN];

/// 1ターン分のデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub turn_id: String,
    /// Person A の質問
    pub question: String,
    /// Person B の回答
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// 行リストから構築（空・重複IDは拒否）
    pub fn new(rows: Vec<Row>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut seen = HashSet::new();
        for row in &rows {
            if !seen.insert(row.turn_id.as_str()) {
                return Err(Error::DuplicateTurnId(row.turn_id.clone()));
            }
        }

        Ok(Self { rows })
    }

    /// CSVファイルから読み込み
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes())
    }

    /// CSVを読み込む
    ///
    /// ヘッダーに必須列がすべて揃っていなければ、行を読む前に
    /// `Error::MissingColumns` を返す。必須以外の列は無視する。
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();

        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let indices: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|c| position(c)).collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&indices)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(?missing, "required columns missing from CSV header");
            return Err(Error::MissingColumns(missing));
        }

        let indices: Vec<usize> = indices.into_iter().flatten().collect();
        let (id_idx, question_idx, answer_idx) = (indices[0], indices[1], indices[2]);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
            rows.push(Row {
                turn_id: field(id_idx),
                question: field(question_idx),
                answer: field(answer_idx),
            });
        }

        tracing::debug!(rows = rows.len(), "dataset loaded");
        Self::new(rows)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 常にfalse（空のデータセットは構築できない）
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// turn_id から行番号を引く
    pub fn position(&self, turn_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.turn_id == turn_id)
    }

    pub fn contains(&self, turn_id: &str) -> bool {
        self.position(turn_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CSV: &str = "turn_id,personA_question,personB_answer,speaker_notes
1,What's your favorite flavor?,Strawberry!,x
2,Any allergies?,\"Nuts, sadly\",y
3,Do you like mint chip?,No.,z
";

    #[test]
    fn test_load_csv() {
        let dataset = Dataset::from_csv_str(TEST_CSV).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[1].answer, "Nuts, sadly");
        assert_eq!(dataset.position("3"), Some(2));
    }

    #[test]
    fn test_column_order_independent() {
        let csv = "personB_answer,turn_id,personA_question\nYes,a1,Hi?\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        let row = &dataset.rows()[0];
        assert_eq!(row.turn_id, "a1");
        assert_eq!(row.question, "Hi?");
        assert_eq!(row.answer, "Yes");
    }

    #[test]
    fn test_missing_answer_column_rejected() {
        let csv = "turn_id,personA_question\n1,Hello?\n";
        let err = Dataset::from_csv_str(csv).unwrap_err();
        match err {
            Error::MissingColumns(cols) => assert_eq!(cols, vec!["personB_answer".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let csv = "turn_id,personA_question,personB_answer\n";
        assert!(matches!(Dataset::from_csv_str(csv), Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_duplicate_turn_id_rejected() {
        let csv = "turn_id,personA_question,personB_answer\n1,a,b\n1,c,d\n";
        assert!(matches!(
            Dataset::from_csv_str(csv),
            Err(Error::DuplicateTurnId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let csv = "turn_id,personA_question,personB_answer\n1,a\n";
        assert!(matches!(Dataset::from_csv_str(csv), Err(Error::Csv(_))));
    }

    #[test]
    fn test_multiline_quoted_field() {
        let csv = "turn_id,personA_question,personB_answer\n1,\"line one\nline two\",ok\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.rows()[0].question, "line one\nline two");
    }
}
