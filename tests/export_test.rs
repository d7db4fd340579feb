//! エクスポートの統合テスト
//!
//! ## 変更履歴
//! - 2026-10-14: 初期作成

use convo_eval_common::{Action, Dataset, Rating, Session};
use convo_eval_rust::error::EvalToolError;
use convo_eval_rust::export::{save_evaluations, save_results_csv};
use tempfile::tempdir;

const CSV: &str = "\
turn_id,personA_question,personB_answer
t1,What is your favorite flavor?,Strawberry
t2,Any allergies?,Nuts
t3,\"Mint chip, then?\",\"No thanks,
I dislike it\"
";

fn dataset() -> Dataset {
    Dataset::from_csv_str(CSV).expect("dataset")
}

#[test]
fn test_save_binary_evaluations_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = Session::<bool>::new(dataset());
    session.apply(Action::Next);
    session.apply(Action::Judge(true));

    let path = save_evaluations(session.evaluations(), dir.path()).expect("save");
    let name = path.file_name().and_then(|n| n.to_str()).expect("file name");
    assert!(name.starts_with("conversation_evaluations_"), "{}", name);
    assert!(name.ends_with(".json"));

    let content = std::fs::read_to_string(&path).expect("read");
    let value: serde_json::Value = serde_json::from_str(&content).expect("json");
    assert_eq!(value, serde_json::json!({ "t2": true }));
}

#[test]
fn test_save_likert_results_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("nested").join("exports");
    let mut session = Session::<Rating>::new(dataset());
    session.apply(Action::Judge(Rating::new(5).expect("rating")));
    session.apply(Action::SetNote("matches facts".into()));
    session.apply(Action::GoTo(2));
    session.apply(Action::Judge(Rating::new(2).expect("rating")));
    session.apply(Action::Clear);

    let path = save_results_csv(&session, &out).expect("export");
    let name = path.file_name().and_then(|n| n.to_str()).expect("file name");
    assert!(name.starts_with("likert_eval_"), "{}", name);
    assert!(name.ends_with(".csv"));

    let mut reader = csv::Reader::from_path(&path).expect("csv");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["turn_id", "personA_question", "personB_answer", "likert_rating", "notes"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][3], "5");
    assert_eq!(&rows[0][4], "matches facts");
    assert_eq!(&rows[1][3], "");
    // クリア済みは空欄
    assert_eq!(&rows[2][3], "");
    assert_eq!(&rows[2][2], "No thanks,\nI dislike it");
}

#[test]
fn test_export_refused_without_evaluations() {
    let dir = tempdir().expect("Failed to create temp dir");
    let session = Session::<bool>::new(dataset());

    let json = save_evaluations(session.evaluations(), dir.path());
    assert!(matches!(json, Err(EvalToolError::NothingToExport)));
    let csv = save_results_csv(&session, dir.path());
    assert!(matches!(csv, Err(EvalToolError::NothingToExport)));

    let written = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(written, 0);
}

#[test]
fn test_export_refused_when_only_cleared_entries() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = Session::<Rating>::new(dataset());
    session.apply(Action::Judge(Rating::new(3).expect("rating")));
    session.apply(Action::Clear);
    assert!(!session.evaluations().is_empty());

    let json = save_evaluations(session.evaluations(), dir.path());
    assert!(matches!(json, Err(EvalToolError::NothingToExport)));
    let csv = save_results_csv(&session, dir.path());
    assert!(matches!(csv, Err(EvalToolError::NothingToExport)));
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn test_export_write_failure_keeps_session() {
    let dir = tempdir().expect("Failed to create temp dir");
    // 出力先にファイルを置いてディレクトリ作成を失敗させる
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").expect("write");

    let mut session = Session::<bool>::new(dataset());
    session.apply(Action::Judge(false));

    let result = save_evaluations(session.evaluations(), &blocker.join("out"));
    assert!(matches!(result, Err(EvalToolError::ExportWrite { .. })));
    assert_eq!(session.current_judgment(), Some(false));
    assert!(save_evaluations(session.evaluations(), dir.path()).is_ok());
}
