//! 評価サマリーの集計
//!
//! 描画のたびに評価ストアから計算し直す。評価が0件でも
//! ゼロ除算や空列の集計は行わず、統計値は `None`（表示は "N/A"）になる。

use crate::judgment::Rating;
use crate::store::EvaluationStore;

/// True/False 判定のサマリー
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinarySummary {
    pub total: usize,
    pub evaluated: usize,
    pub true_count: usize,
    pub false_count: usize,
}

impl BinarySummary {
    pub fn compute(total: usize, store: &EvaluationStore<bool>) -> Self {
        let (true_count, false_count) = store.values().fold((0, 0), |(t, f), v| {
            if v { (t + 1, f) } else { (t, f + 1) }
        });
        Self {
            total,
            evaluated: true_count + false_count,
            true_count,
            false_count,
        }
    }

    /// Trueの割合（%）、評価0件なら0
    pub fn true_percentage(&self) -> f64 {
        percentage(self.true_count, self.evaluated)
    }

    pub fn false_percentage(&self) -> f64 {
        percentage(self.false_count, self.evaluated)
    }

    pub fn progress(&self) -> f64 {
        progress(self.evaluated, self.total)
    }
}

/// 平均・母標準偏差・中央値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
}

impl RatingStats {
    /// 空なら `None`
    pub fn compute(ratings: &[Rating]) -> Option<Self> {
        if ratings.is_empty() {
            return None;
        }

        let n = ratings.len() as f64;
        let values: Vec<f64> = ratings.iter().map(|r| f64::from(r.value())).collect();
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values;
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            median,
        })
    }
}

/// リッカート評価のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct LikertSummary {
    pub total: usize,
    pub evaluated: usize,
    pub stats: Option<RatingStats>,
    /// index 0 が評価1、index 4 が評価5
    pub rating_counts: [usize; 5],
}

impl LikertSummary {
    pub fn compute(total: usize, store: &EvaluationStore<Rating>) -> Self {
        let ratings: Vec<Rating> = store.values().collect();
        Self::from_ratings(total, &ratings)
    }

    pub fn from_ratings(total: usize, ratings: &[Rating]) -> Self {
        let mut rating_counts = [0; 5];
        for rating in ratings {
            rating_counts[usize::from(rating.value() - Rating::MIN)] += 1;
        }
        Self {
            total,
            evaluated: ratings.len(),
            stats: RatingStats::compute(ratings),
            rating_counts,
        }
    }

    pub fn count(&self, rating: Rating) -> usize {
        self.rating_counts[usize::from(rating.value() - Rating::MIN)]
    }

    /// 評価ごとの割合（%）、評価0件なら0
    pub fn rating_percentage(&self, rating: Rating) -> f64 {
        percentage(self.count(rating), self.evaluated)
    }

    pub fn mean(&self) -> Option<f64> {
        self.stats.map(|s| s.mean)
    }

    pub fn std_dev(&self) -> Option<f64> {
        self.stats.map(|s| s.std_dev)
    }

    pub fn median(&self) -> Option<f64> {
        self.stats.map(|s| s.median)
    }

    pub fn progress(&self) -> f64 {
        progress(self.evaluated, self.total)
    }
}

/// フロントエンド向けのサマリー
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Binary(BinarySummary),
    Likert(LikertSummary),
}

impl Summary {
    pub fn total(&self) -> usize {
        match self {
            Summary::Binary(s) => s.total,
            Summary::Likert(s) => s.total,
        }
    }

    pub fn evaluated(&self) -> usize {
        match self {
            Summary::Binary(s) => s.evaluated,
            Summary::Likert(s) => s.evaluated,
        }
    }

    /// 0.0〜1.0
    pub fn progress(&self) -> f64 {
        progress(self.evaluated(), self.total())
    }

    /// "Progress: 3/10 turns evaluated"
    pub fn progress_text(&self) -> String {
        format!(
            "Progress: {}/{} turns evaluated",
            self.evaluated(),
            self.total()
        )
    }
}

/// 統計値の表示（`None` は "N/A"）
pub fn format_stat(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "N/A".to_string(),
    }
}

fn percentage(count: usize, evaluated: usize) -> f64 {
    if evaluated == 0 {
        0.0
    } else {
        count as f64 / evaluated as f64 * 100.0
    }
}

fn progress(evaluated: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        evaluated as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[u8]) -> Vec<Rating> {
        values.iter().map(|&v| Rating::new(v).unwrap()).collect()
    }

    #[test]
    fn test_likert_stats() {
        let summary = LikertSummary::from_ratings(10, &ratings(&[5, 5, 4, 3, 1]));
        let stats = summary.stats.unwrap();

        assert!((stats.mean - 3.6).abs() < 1e-9);
        assert!((stats.median - 4.0).abs() < 1e-9);
        assert!((stats.std_dev - 1.4967).abs() < 1e-3);
        assert_eq!(summary.rating_counts, [1, 0, 1, 1, 2]);
        assert!((summary.progress() - 0.5).abs() < 1e-9);
        assert!((summary.rating_percentage(Rating::new(5).unwrap()) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_likert_even_median() {
        let summary = LikertSummary::from_ratings(4, &ratings(&[1, 2, 4, 5]));
        assert_eq!(summary.median(), Some(3.0));
    }

    #[test]
    fn test_likert_empty() {
        let store = EvaluationStore::<Rating>::new();
        let summary = LikertSummary::compute(3, &store);

        assert_eq!(summary.evaluated, 0);
        assert!(summary.stats.is_none());
        assert_eq!(summary.rating_counts, [0; 5]);
        assert_eq!(summary.rating_percentage(Rating::new(1).unwrap()), 0.0);
        assert_eq!(format_stat(summary.mean(), 2), "N/A");
        assert_eq!(format_stat(summary.median(), 1), "N/A");
        assert_eq!(summary.progress(), 0.0);
    }

    #[test]
    fn test_likert_ignores_cleared() {
        let mut store = EvaluationStore::<Rating>::new();
        store.set("a", Rating::new(2).unwrap());
        store.set("b", Rating::new(4).unwrap());
        store.clear("a");

        let summary = LikertSummary::compute(2, &store);
        assert_eq!(summary.evaluated, 1);
        assert_eq!(summary.mean(), Some(4.0));
        assert_eq!(summary.std_dev(), Some(0.0));
    }

    #[test]
    fn test_binary_summary() {
        let mut store = EvaluationStore::<bool>::new();
        store.set("1", true);
        store.set("2", true);
        store.set("3", false);
        store.set("4", true);

        let summary = BinarySummary::compute(8, &store);
        assert_eq!(summary.evaluated, 4);
        assert_eq!(summary.true_count, 3);
        assert_eq!(summary.false_count, 1);
        assert!((summary.true_percentage() - 75.0).abs() < 1e-9);
        assert!((summary.false_percentage() - 25.0).abs() < 1e-9);
        assert!((summary.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_binary_empty() {
        let summary = BinarySummary::compute(5, &EvaluationStore::new());
        assert_eq!(summary.evaluated, 0);
        assert_eq!(summary.true_percentage(), 0.0);
        assert_eq!(summary.false_percentage(), 0.0);
        assert_eq!(summary.progress(), 0.0);
    }

    #[test]
    fn test_progress_zero_total() {
        assert_eq!(progress(0, 0), 0.0);
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(Some(3.6), 2), "3.60");
        assert_eq!(format_stat(Some(4.0), 1), "4.0");
    }

    #[test]
    fn test_summary_progress_text() {
        let summary = Summary::Binary(BinarySummary::compute(10, &EvaluationStore::new()));
        assert_eq!(summary.progress_text(), "Progress: 0/10 turns evaluated");
    }
}
