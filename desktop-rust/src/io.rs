use anyhow::{Context, Result};
use convo_eval_common::export::{csv_file_name, evaluations_json, json_file_name, results_csv};
use convo_eval_common::{Dataset, EvaluationStore, Judgment, Session};
use std::fs;
use std::path::{Path, PathBuf};

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    Dataset::from_csv_path(path).with_context(|| format!("load {}", path.display()))
}

pub fn load_evaluations<J: Judgment>(path: &Path) -> Result<EvaluationStore<J>> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    EvaluationStore::from_json(&content).with_context(|| format!("parse {}", path.display()))
}

pub fn default_json_name<J: Judgment>() -> String {
    json_file_name(J::MODE, convo_eval_common::export::local_timestamp())
}

pub fn default_csv_name<J: Judgment>() -> String {
    csv_file_name(J::MODE, convo_eval_common::export::local_timestamp())
}

pub fn save_evaluations<J: Judgment>(path: &Path, store: &EvaluationStore<J>) -> Result<()> {
    let content = evaluations_json(store)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn save_results<J: Judgment>(path: &Path, session: &Session<J>) -> Result<()> {
    let content = results_csv(session)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// CSVと同じフォルダに置く既定の保存先
pub fn default_output_path(source: Option<&Path>, file_name: &str) -> PathBuf {
    source
        .and_then(|p| p.parent())
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}
