//! エクスポートファイルの書き出し
//!
//! 書き込みに失敗してもセッションには触れないので、そのまま再試行できる。

use crate::error::{EvalToolError, Result};
use convo_eval_common::export::{
    csv_file_name, evaluations_json, json_file_name, local_timestamp, results_csv,
};
use convo_eval_common::{EvaluationStore, Judgment, Session};
use std::path::{Path, PathBuf};

/// 評価JSONを保存
///
/// 評価済みが1件もなければ（クリア済みだけの場合も）保存しない。
pub fn save_evaluations<J: Judgment>(store: &EvaluationStore<J>, output_dir: &Path) -> Result<PathBuf> {
    if store.evaluated_count() == 0 {
        return Err(EvalToolError::NothingToExport);
    }
    let content = evaluations_json(store)?;
    let file_name = json_file_name(J::MODE, local_timestamp());
    write_artifact(output_dir, &file_name, &content)
}

/// 結果CSVを保存
pub fn save_results_csv<J: Judgment>(session: &Session<J>, output_dir: &Path) -> Result<PathBuf> {
    if session.evaluations().evaluated_count() == 0 {
        return Err(EvalToolError::NothingToExport);
    }
    let content = results_csv(session)?;
    let file_name = csv_file_name(J::MODE, local_timestamp());
    write_artifact(output_dir, &file_name, &content)
}

fn write_artifact(output_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = output_dir.join(file_name);
    let write = || -> std::io::Result<()> {
        std::fs::create_dir_all(output_dir)?;
        std::fs::write(&path, content)
    };
    write().map_err(|source| {
        tracing::error!(path = %path.display(), %source, "export failed");
        EvalToolError::ExportWrite {
            path: path.clone(),
            source,
        }
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "export written");
    Ok(path)
}
