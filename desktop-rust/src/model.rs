use convo_eval_common::{Dataset, EvalMode, Judgment, Rating, Session};
use std::path::PathBuf;

/// 読み込み済みのセッション（モードごと）
#[derive(Debug, Clone)]
pub enum Workspace {
    Binary(Session<bool>),
    Likert(Session<Rating>),
}

impl Workspace {
    pub fn new(mode: EvalMode, dataset: Dataset) -> Self {
        match mode {
            EvalMode::Binary => Workspace::Binary(Session::new(dataset)),
            EvalMode::Likert => Workspace::Likert(Session::new(dataset)),
        }
    }

    pub fn mode(&self) -> EvalMode {
        match self {
            Workspace::Binary(_) => EvalMode::Binary,
            Workspace::Likert(_) => EvalMode::Likert,
        }
    }

    /// 評価とメモを消して先頭に戻る
    pub fn reinitialize(&mut self) {
        match self {
            Workspace::Binary(s) => s.reinitialize(),
            Workspace::Likert(s) => s.reinitialize(),
        }
    }

    pub fn has_evaluations(&self) -> bool {
        match self {
            Workspace::Binary(s) => s.evaluations().evaluated_count() > 0,
            Workspace::Likert(s) => s.evaluations().evaluated_count() > 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub workspace: Option<Workspace>,
    /// 次に開くCSVに使うモード
    pub mode: EvalMode,
    pub source_path: Option<PathBuf>,
    pub allow_clear_binary: bool,
}

/// 画面側だけの状態（セッションには保存しない）
#[derive(Debug, Clone)]
pub struct ViewState {
    /// この turn_id に合わせて下書きを同期済み
    pub synced_turn: Option<String>,
    pub note_draft: String,
    pub slider_value: u8,
    /// 1始まり
    pub goto_turn: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            synced_turn: None,
            note_draft: String::new(),
            slider_value: 3,
            goto_turn: 1,
        }
    }
}

impl ViewState {
    /// 現在行が変わっていれば下書きを読み直す（変わったら true）
    pub fn sync<J: Judgment>(&mut self, session: &Session<J>) -> bool {
        let turn_id = &session.current_row().turn_id;
        if self.synced_turn.as_ref() == Some(turn_id) {
            return false;
        }
        self.synced_turn = Some(turn_id.clone());
        self.note_draft = session.current_note().to_string();
        self.goto_turn = session.current_index() + 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
