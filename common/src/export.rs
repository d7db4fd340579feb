//! エクスポート
//!
//! - JSON: 評価ストアをそのまま出力（turn_id → 値 / null）
//! - CSV: データセットの全行に評価とメモを左結合して出力
//!
//! どちらもセッションを読むだけで変更しない。
//! ファイルへの書き込みは各フロントエンド側で行う。

use crate::dataset::REQUIRED_COLUMNS;
use crate::error::{Error, Result};
use crate::judgment::{EvalMode, Judgment};
use crate::session::Session;
use crate::store::EvaluationStore;
use chrono::NaiveDateTime;

/// ファイル名に使うタイムスタンプ形式
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const NOTES_COLUMN: &str = "notes";

/// 評価ストアを整形済みJSONにする
pub fn evaluations_json<J: Judgment>(store: &EvaluationStore<J>) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// 全行 + 評価 + メモのCSVを作る
///
/// 未評価・クリア済みの評価とメモは空セルになる。
pub fn results_csv<J: Judgment>(session: &Session<J>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    header.push(J::MODE.judgment_column());
    header.push(NOTES_COLUMN);
    writer.write_record(&header)?;

    for row in session.dataset().rows() {
        let judgment = session
            .evaluations()
            .get(&row.turn_id)
            .map(|v| v.csv_field())
            .unwrap_or_default();
        let notes = session.notes().get(&row.turn_id);
        writer.write_record([
            row.turn_id.as_str(),
            row.question.as_str(),
            row.answer.as_str(),
            judgment.as_str(),
            notes,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// `conversation_evaluations[_likert]_<timestamp>.json`
pub fn json_file_name(mode: EvalMode, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.json",
        mode.json_prefix(),
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// `conversation_evaluations_<timestamp>.csv` / `likert_eval_<timestamp>.csv`
pub fn csv_file_name(mode: EvalMode, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.csv",
        mode.csv_prefix(),
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// 現在のローカル時刻
pub fn local_timestamp() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
