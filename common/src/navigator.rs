//! 現在行の移動
//!
//! 現在位置は常に `[0, len-1]` に収まる。

use crate::dataset::Dataset;
use crate::judgment::Judgment;
use crate::store::EvaluationStore;

/// 移動操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// 位置が変わった
    Moved(usize),
    /// 端にいる・同じ位置などで変化なし
    Unchanged,
    /// 未評価の行が残っていない
    NoneRemaining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    len: usize,
}

impl Navigator {
    /// `len` 行のデータセット用（`len` は1以上）
    pub fn new(len: usize) -> Self {
        Self {
            current: 0,
            len: len.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.len
    }

    pub fn previous(&mut self) -> NavOutcome {
        self.move_to(self.current.saturating_sub(1))
    }

    pub fn next(&mut self) -> NavOutcome {
        self.move_to((self.current + 1).min(self.len - 1))
    }

    /// 指定行へ移動（範囲外なら移動しない）
    pub fn go_to(&mut self, index: usize) -> NavOutcome {
        if index >= self.len {
            tracing::debug!(index, len = self.len, "go_to out of range");
            return NavOutcome::Unchanged;
        }
        self.move_to(index)
    }

    /// 先頭から走査して最初の未評価行へ移動
    pub fn jump_to_next_unevaluated<J: Judgment>(
        &mut self,
        dataset: &Dataset,
        store: &EvaluationStore<J>,
    ) -> NavOutcome {
        match first_unevaluated(dataset, store) {
            Some(index) => self.move_to(index),
            None => NavOutcome::NoneRemaining,
        }
    }

    /// 現在行の次から末尾、続けて先頭から現在行までを走査
    pub fn first_unevaluated_after<J: Judgment>(
        &self,
        dataset: &Dataset,
        store: &EvaluationStore<J>,
    ) -> Option<usize> {
        let len = dataset.len();
        (1..=len)
            .map(|offset| (self.current + offset) % len)
            .find(|&i| {
                dataset
                    .get(i)
                    .is_some_and(|row| !store.is_evaluated(&row.turn_id))
            })
    }

    fn move_to(&mut self, index: usize) -> NavOutcome {
        if index == self.current {
            NavOutcome::Unchanged
        } else {
            self.current = index;
            NavOutcome::Moved(index)
        }
    }
}

/// 先頭から見て最初の未評価行
pub fn first_unevaluated<J: Judgment>(dataset: &Dataset, store: &EvaluationStore<J>) -> Option<usize> {
    dataset
        .rows()
        .iter()
        .position(|row| !store.is_evaluated(&row.turn_id))
}

/// 未評価の行数
pub fn unevaluated_count<J: Judgment>(dataset: &Dataset, store: &EvaluationStore<J>) -> usize {
    dataset
        .rows()
        .iter()
        .filter(|row| !store.is_evaluated(&row.turn_id))
        .count()
}
