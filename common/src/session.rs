//! 評価セッション
//!
//! 現在位置・評価・メモを1つにまとめた状態。フロントエンドは
//! ユーザー操作を `Action` に変換して `Session::apply` に渡し、
//! その後に画面を描き直す。状態を変更する経路は `apply` と
//! `reinitialize` だけ。
//!
//! ## 変更履歴
//! - 2026-10-14: 初期作成

use crate::dataset::{Dataset, Row};
use crate::judgment::Judgment;
use crate::navigator::{self, NavOutcome, Navigator};
use crate::store::{EvaluationStore, NotesStore};
use crate::summary::Summary;

/// ユーザー操作（対象は常に現在行）
#[derive(Debug, Clone, PartialEq)]
pub enum Action<J> {
    Previous,
    Next,
    /// 0始まりの行番号へ移動
    GoTo(usize),
    JumpToNextUnevaluated,
    Judge(J),
    Clear,
    SetNote(String),
}

/// 操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved(usize),
    Unchanged,
    NoneRemaining,
    Judged,
    /// 評価後に次の未評価行へ移動した
    JudgedAndAdvanced(usize),
    Cleared,
    NoteSaved,
}

impl From<NavOutcome> for Outcome {
    fn from(outcome: NavOutcome) -> Self {
        match outcome {
            NavOutcome::Moved(index) => Outcome::Moved(index),
            NavOutcome::Unchanged => Outcome::Unchanged,
            NavOutcome::NoneRemaining => Outcome::NoneRemaining,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session<J: Judgment> {
    dataset: Dataset,
    navigator: Navigator,
    evaluations: EvaluationStore<J>,
    notes: NotesStore,
    /// 評価したら次の未評価行へ進む
    pub auto_advance: bool,
}

impl<J: Judgment> Session<J> {
    pub fn new(dataset: Dataset) -> Self {
        let navigator = Navigator::new(dataset.len());
        let mut session = Self {
            dataset,
            navigator,
            evaluations: EvaluationStore::new(),
            notes: NotesStore::new(),
            auto_advance: false,
        };
        session.touch_current_note();
        session
    }

    /// 保存済みの評価を引き継いでセッションを開始
    ///
    /// データセットに無い turn_id の一覧を返す。
    pub fn with_evaluations(dataset: Dataset, evaluations: EvaluationStore<J>) -> (Self, Vec<String>) {
        let mut session = Self::new(dataset);
        let unknown = session.evaluations.merge(evaluations, &session.dataset);
        (session, unknown)
    }

    /// 位置・評価・メモをすべて初期状態に戻す
    pub fn reinitialize(&mut self) {
        tracing::info!("session reinitialized");
        self.navigator = Navigator::new(self.dataset.len());
        self.evaluations = EvaluationStore::new();
        self.notes = NotesStore::new();
        self.touch_current_note();
    }

    pub fn apply(&mut self, action: Action<J>) -> Outcome {
        tracing::debug!(?action, index = self.navigator.current(), "apply action");
        let outcome = match action {
            Action::Previous => self.navigator.previous().into(),
            Action::Next => self.navigator.next().into(),
            Action::GoTo(index) => self.navigator.go_to(index).into(),
            Action::JumpToNextUnevaluated => self
                .navigator
                .jump_to_next_unevaluated(&self.dataset, &self.evaluations)
                .into(),
            Action::Judge(value) => {
                let turn_id = self.current_row().turn_id.clone();
                self.evaluations.set(&turn_id, value);
                self.advance_after_judgment()
            }
            Action::Clear => {
                let turn_id = self.current_row().turn_id.clone();
                self.evaluations.clear(&turn_id);
                Outcome::Cleared
            }
            Action::SetNote(text) => {
                let turn_id = self.current_row().turn_id.clone();
                self.notes.set(&turn_id, text);
                Outcome::NoteSaved
            }
        };
        self.touch_current_note();
        outcome
    }

    fn advance_after_judgment(&mut self) -> Outcome {
        if !self.auto_advance {
            return Outcome::Judged;
        }
        match self
            .navigator
            .first_unevaluated_after(&self.dataset, &self.evaluations)
        {
            Some(index) => {
                self.navigator.go_to(index);
                Outcome::JudgedAndAdvanced(index)
            }
            None => Outcome::Judged,
        }
    }

    fn touch_current_note(&mut self) {
        let turn_id = self.current_row().turn_id.clone();
        self.notes.touch(&turn_id);
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn evaluations(&self) -> &EvaluationStore<J> {
        &self.evaluations
    }

    pub fn notes(&self) -> &NotesStore {
        &self.notes
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current_row(&self) -> &Row {
        // Navigator は常に dataset の範囲内、dataset は空にならない
        &self.dataset.rows()[self.navigator.current()]
    }

    pub fn current_judgment(&self) -> Option<J> {
        self.evaluations.get(&self.current_row().turn_id)
    }

    pub fn current_note(&self) -> &str {
        self.notes.get(&self.current_row().turn_id)
    }

    pub fn unevaluated_count(&self) -> usize {
        navigator::unevaluated_count(&self.dataset, &self.evaluations)
    }

    pub fn summary(&self) -> Summary {
        J::summarize(self.dataset.len(), &self.evaluations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judgment::Rating;

    const CSV: &str = "turn_id,personA_question,personB_answer
t1,Favorite flavor?,Strawberry
t2,Allergies?,Nuts
t3,Rocky road?,No thanks
";

    fn session<J: Judgment>() -> Session<J> {
        Session::new(Dataset::from_csv_str(CSV).unwrap())
    }

    #[test]
    fn test_new_session_starts_at_zero() {
        let s = session::<bool>();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.current_row().turn_id, "t1");
        assert_eq!(s.current_judgment(), None);
        assert_eq!(s.current_note(), "");
        assert_eq!(s.unevaluated_count(), 3);
    }

    #[test]
    fn test_judge_targets_current_row() {
        let mut s = session::<bool>();
        s.apply(Action::Next);
        assert_eq!(s.apply(Action::Judge(true)), Outcome::Judged);
        assert_eq!(s.evaluations().get("t2"), Some(true));
        assert_eq!(s.evaluations().get("t1"), None);

        s.apply(Action::Judge(false));
        assert_eq!(s.evaluations().get("t2"), Some(false));
        assert_eq!(s.evaluations().evaluated_count(), 1);
    }

    #[test]
    fn test_notes_survive_navigation() {
        let mut s = session::<Rating>();
        s.apply(Action::SetNote("hedged answer".to_string()));
        s.apply(Action::Next);
        assert_eq!(s.current_note(), "");
        s.apply(Action::Previous);
        assert_eq!(s.current_note(), "hedged answer");
        assert_eq!(s.current_judgment(), None);
    }

    #[test]
    fn test_clear_binary_judgment() {
        let mut s = session::<bool>();
        s.apply(Action::Judge(true));
        assert_eq!(s.apply(Action::Clear), Outcome::Cleared);
        assert_eq!(s.current_judgment(), None);
    }

    #[test]
    fn test_jump_after_clearing() {
        let mut s = session::<Rating>();
        for _ in 0..3 {
            s.apply(Action::Judge(Rating::new(3).unwrap()));
            s.apply(Action::Next);
        }
        assert_eq!(s.apply(Action::JumpToNextUnevaluated), Outcome::NoneRemaining);

        s.apply(Action::GoTo(1));
        s.apply(Action::Clear);
        s.apply(Action::GoTo(2));
        assert_eq!(s.apply(Action::JumpToNextUnevaluated), Outcome::Moved(1));
    }

    #[test]
    fn test_auto_advance() {
        let mut s = session::<bool>();
        s.auto_advance = true;
        assert_eq!(s.apply(Action::Judge(true)), Outcome::JudgedAndAdvanced(1));
        s.apply(Action::GoTo(2));
        assert_eq!(s.apply(Action::Judge(true)), Outcome::JudgedAndAdvanced(1));
        assert_eq!(s.apply(Action::Judge(false)), Outcome::Judged);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_reinitialize() {
        let mut s = session::<bool>();
        s.apply(Action::Judge(true));
        s.apply(Action::SetNote("x".into()));
        s.apply(Action::Next);
        s.reinitialize();

        assert_eq!(s.current_index(), 0);
        assert!(s.evaluations().is_empty());
        assert_eq!(s.current_note(), "");
    }

    #[test]
    fn test_with_evaluations() {
        let loaded = EvaluationStore::<bool>::from_json(r#"{"t3": true, "t9": false}"#).unwrap();
        let (s, unknown) = Session::with_evaluations(Dataset::from_csv_str(CSV).unwrap(), loaded);
        assert_eq!(unknown, vec!["t9".to_string()]);
        assert_eq!(s.evaluations().get("t3"), Some(true));
        assert_eq!(s.current_index(), 0);
    }
}
