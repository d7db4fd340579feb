//! 対話式評価モジュール
//!
//! 1回のループで「描画 → 操作選択 → `Session::apply`」を行う。
//! 操作メニューの組み立ては `menu_entries` に分けてあり、端末入出力なしで検証できる。
//!
//! ## 変更履歴
//! - 2026-10-14: 初期作成

use crate::error::{EvalToolError, Result};
use crate::export;
use crate::render;
use convo_eval_common::{Action, Dataset, EvalMode, EvaluationStore, Judgment, Outcome, Session};
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

/// 対話ループの設定
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    pub output_dir: PathBuf,
    /// クリア操作を表示する
    pub show_clear: bool,
    pub background: Option<String>,
}

/// メニュー項目
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem<J> {
    /// セッション操作にそのまま変換できるもの
    Apply(Action<J>),
    EditNote,
    GoToTurn,
    SaveJson,
    ExportCsv,
    ShowGuide,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<J> {
    pub label: String,
    pub item: MenuItem<J>,
}

impl<J> MenuEntry<J> {
    fn new(label: impl Into<String>, item: MenuItem<J>) -> Self {
        Self {
            label: label.into(),
            item,
        }
    }
}

/// 現在の状態で選べる操作
///
/// 先頭/末尾では前/次を出さない。クリアは評価済みのときだけ、
/// 未評価ジャンプは未評価が残っているときだけ表示する。
pub fn menu_entries<J: Judgment>(session: &Session<J>, show_clear: bool) -> Vec<MenuEntry<J>> {
    let current = session.current_judgment();
    let mut entries: Vec<MenuEntry<J>> = J::choices()
        .into_iter()
        .map(|choice| {
            let marker = if current == Some(choice) { " ◀" } else { "" };
            MenuEntry::new(
                format!("{}{}", choice.choice_label(), marker),
                MenuItem::Apply(Action::Judge(choice)),
            )
        })
        .collect();

    let nav = session.navigator();
    if !nav.is_last() {
        entries.push(MenuEntry::new("Next ➡️", MenuItem::Apply(Action::Next)));
    }
    if !nav.is_first() {
        entries.push(MenuEntry::new("⬅️ Previous", MenuItem::Apply(Action::Previous)));
    }
    if show_clear && current.is_some() {
        entries.push(MenuEntry::new("🗑️ Clear Rating", MenuItem::Apply(Action::Clear)));
    }

    let remaining = session.unevaluated_count();
    if remaining > 0 {
        entries.push(MenuEntry::new(
            format!("🚀 Jump to Next Unrated Turn ({} remaining)", remaining),
            MenuItem::Apply(Action::JumpToNextUnevaluated),
        ));
    }

    entries.push(MenuEntry::new("📝 Edit notes", MenuItem::EditNote));
    entries.push(MenuEntry::new("🔢 Go to turn...", MenuItem::GoToTurn));
    entries.push(MenuEntry::new("💾 Save Evaluations (JSON)", MenuItem::SaveJson));
    entries.push(MenuEntry::new("📥 Export Results (CSV)", MenuItem::ExportCsv));
    if J::MODE == EvalMode::Likert {
        entries.push(MenuEntry::new("📋 Rating Scale Guide", MenuItem::ShowGuide));
    }
    entries.push(MenuEntry::new("Quit", MenuItem::Quit));
    entries
}

/// 未保存の変更
///
/// JSONには評価しか入らないので、メモは別に追跡する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyState {
    pub judgments: bool,
    pub notes: bool,
}

impl DirtyState {
    /// セッション操作の結果を反映
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Judged | Outcome::JudgedAndAdvanced(_) | Outcome::Cleared => {
                self.judgments = true
            }
            Outcome::NoteSaved => self.notes = true,
            Outcome::Moved(_) | Outcome::Unchanged | Outcome::NoneRemaining => {}
        }
    }

    /// 保存が成功した項目の分だけフラグを下ろす
    pub fn mark_saved<J>(&mut self, item: &MenuItem<J>) {
        match item {
            MenuItem::SaveJson => self.judgments = false,
            MenuItem::ExportCsv => *self = Self::default(),
            _ => {}
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.judgments || self.notes
    }
}

/// 入力された「ターン番号」（1始まり）を行番号に変換
pub fn parse_turn_number(input: &str, total: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=total).contains(&n).then(|| n - 1)
}

/// CSV未指定時は既定ファイルを使う
pub fn resolve_dataset_path(arg: Option<&Path>, default_csv: &Path) -> Result<PathBuf> {
    let path = arg.unwrap_or(default_csv).to_path_buf();
    if !path.exists() {
        return Err(EvalToolError::DatasetNotFound(path));
    }
    if arg.is_none() {
        println!("ℹ {} を読み込みます", path.display());
    }
    Ok(path)
}

/// データセットを読み込み、必要なら保存済み評価を取り込んでセッションを作る
///
/// データセットに存在しない turn_id の一覧も返す。
pub fn load_session<J: Judgment>(
    csv_path: &Path,
    resume: Option<&Path>,
) -> Result<(Session<J>, Vec<String>)> {
    let dataset = Dataset::from_csv_path(csv_path)?;
    let Some(resume_path) = resume else {
        return Ok((Session::new(dataset), Vec::new()));
    };

    if !resume_path.exists() {
        return Err(EvalToolError::EvaluationsNotFound(resume_path.to_path_buf()));
    }
    let content = std::fs::read_to_string(resume_path)?;
    let store = EvaluationStore::<J>::from_json(&content)?;
    Ok(Session::with_evaluations(dataset, store))
}

/// 対話ループ
pub fn run<J: Judgment>(mut session: Session<J>, options: &AnnotateOptions) -> Result<()> {
    if J::MODE == EvalMode::Likert {
        println!("{}\n", render::rating_guide());
    }

    let mut dirty = DirtyState::default();

    loop {
        println!("{}\n", render::header(J::MODE, options.background.as_deref()));
        let summary = session.summary();
        println!("{}", render::summary(&summary));
        render::draw_progress(&summary);
        println!("{}", render::current_turn(&session));

        let entries = menu_entries(&session, options.show_clear);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        let selection = Select::new()
            .with_prompt("操作を選択 (Esc: 終了)")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let item = match selection {
            Some(index) => entries[index].item.clone(),
            None => MenuItem::Quit,
        };

        match &item {
            MenuItem::Apply(action) => {
                let outcome = session.apply(action.clone());
                dirty.record(outcome);
                if outcome == Outcome::NoneRemaining {
                    println!("✓ すべてのターンが評価済みです");
                }
            }
            MenuItem::EditNote => {
                let note: String = Input::new()
                    .with_prompt("📝 Notes (optional)")
                    .with_initial_text(session.current_note())
                    .allow_empty(true)
                    .interact_text()?;
                if note != session.current_note() {
                    dirty.record(session.apply(Action::SetNote(note)));
                }
            }
            MenuItem::GoToTurn => {
                let total = session.dataset().len();
                let input: String = Input::new()
                    .with_prompt(format!("Jump to turn [1-{}]", total))
                    .allow_empty(true)
                    .interact_text()?;
                match parse_turn_number(&input, total) {
                    Some(index) => {
                        session.apply(Action::GoTo(index));
                    }
                    None if input.trim().is_empty() => {}
                    None => println!("⚠ 無効なターン番号です: {}", input.trim()),
                }
            }
            MenuItem::SaveJson => {
                match export::save_evaluations(session.evaluations(), &options.output_dir) {
                    Ok(path) => {
                        println!("✔ Evaluations saved to {}", path.display());
                        dirty.mark_saved(&item);
                        let notes = session.notes().written_count();
                        if dirty.notes && notes > 0 {
                            println!("ℹ メモ{}件はJSONに含まれません。CSVでエクスポートしてください", notes);
                        }
                    }
                    Err(e) => println!("⚠ {}", e),
                }
            }
            MenuItem::ExportCsv => match export::save_results_csv(&session, &options.output_dir) {
                Ok(path) => {
                    println!("✔ Results exported to {}", path.display());
                    dirty.mark_saved(&item);
                }
                Err(e) => println!("⚠ {}", e),
            },
            MenuItem::ShowGuide => println!("{}", render::rating_guide()),
            MenuItem::Quit => {
                if dirty.is_dirty() {
                    let prompt = if dirty.judgments {
                        "未保存の変更があります。終了しますか？"
                    } else {
                        "メモが未保存です（CSVエクスポートで保存されます）。終了しますか？"
                    };
                    let quit = Confirm::new().with_prompt(prompt).default(false).interact()?;
                    if !quit {
                        continue;
                    }
                }
                break;
            }
        }
        println!();
    }

    let summary = session.summary();
    println!("\n{}", render::summary(&summary));
    println!("{}", summary.progress_text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use convo_eval_common::Rating;

    const CSV: &str = "turn_id,personA_question,personB_answer\n1,a,b\n2,c,d\n3,e,f\n";

    fn session<J: Judgment>() -> Session<J> {
        Session::new(Dataset::from_csv_str(CSV).unwrap())
    }

    fn labels<J>(entries: &[MenuEntry<J>]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_menu_at_first_row() {
        let s = session::<bool>();
        let entries = menu_entries(&s, false);
        let labels = labels(&entries);

        assert_eq!(labels[0], "✅ True");
        assert_eq!(labels[1], "❌ False");
        assert!(labels.contains(&"Next ➡️"));
        assert!(!labels.contains(&"⬅️ Previous"));
        assert!(labels.contains(&"🚀 Jump to Next Unrated Turn (3 remaining)"));
        assert!(!labels.iter().any(|l| l.contains("Clear")));
        assert!(!labels.iter().any(|l| l.contains("Guide")));
        assert_eq!(entries.last().map(|e| &e.item), Some(&MenuItem::Quit));
    }

    #[test]
    fn test_menu_marks_current_choice() {
        let mut s = session::<Rating>();
        s.apply(Action::Judge(Rating::new(4).unwrap()));
        let entries = menu_entries(&s, true);

        assert_eq!(entries[3].label, "😊 4 ◀");
        assert_eq!(entries[3].item, MenuItem::Apply(Action::Judge(Rating::new(4).unwrap())));
        assert!(entries.iter().any(|e| e.item == MenuItem::Apply(Action::Clear)));
        assert!(entries.iter().any(|e| e.item == MenuItem::ShowGuide));
    }

    #[test]
    fn test_menu_at_last_row_all_evaluated() {
        let mut s = session::<bool>();
        for _ in 0..3 {
            s.apply(Action::Judge(true));
            s.apply(Action::Next);
        }
        let entries = menu_entries(&s, false);

        assert!(!entries.iter().any(|e| e.item == MenuItem::Apply(Action::Next)));
        assert!(entries.iter().any(|e| e.item == MenuItem::Apply(Action::Previous)));
        assert!(!entries.iter().any(|e| e.item == MenuItem::Apply(Action::JumpToNextUnevaluated)));
    }

    #[test]
    fn test_clear_hidden_when_unevaluated() {
        let s = session::<Rating>();
        let entries = menu_entries(&s, true);
        assert!(!entries.iter().any(|e| e.item == MenuItem::Apply(Action::Clear)));
    }

    #[test]
    fn test_json_save_keeps_notes_dirty() {
        let mut s = session::<bool>();
        let mut dirty = DirtyState::default();

        dirty.record(s.apply(Action::SetNote("check allergy".into())));
        dirty.mark_saved(&MenuItem::<bool>::SaveJson);
        assert!(dirty.notes);
        assert!(dirty.is_dirty());

        dirty.mark_saved(&MenuItem::<bool>::ExportCsv);
        assert!(!dirty.is_dirty());
    }

    #[test]
    fn test_dirty_tracks_judgments() {
        let mut s = session::<Rating>();
        let mut dirty = DirtyState::default();

        dirty.record(s.apply(Action::Next));
        assert!(!dirty.is_dirty());

        dirty.record(s.apply(Action::Judge(Rating::new(2).unwrap())));
        assert_eq!(dirty, DirtyState { judgments: true, notes: false });

        dirty.mark_saved(&MenuItem::<Rating>::SaveJson);
        assert!(!dirty.is_dirty());

        dirty.record(s.apply(Action::Clear));
        assert!(dirty.judgments);
    }

    #[test]
    fn test_parse_turn_number() {
        assert_eq!(parse_turn_number("1", 3), Some(0));
        assert_eq!(parse_turn_number(" 3 ", 3), Some(2));
        assert_eq!(parse_turn_number("0", 3), None);
        assert_eq!(parse_turn_number("4", 3), None);
        assert_eq!(parse_turn_number("abc", 3), None);
    }
}
