//! 端末向けの描画
//!
//! 文字列を組み立てるだけで、出力は呼び出し側で行う。

use convo_eval_common::summary::{BinarySummary, LikertSummary};
use convo_eval_common::{format_stat, EvalMode, Judgment, Rating, Session, Summary};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const DIVIDER: &str = "────────────────────────────────────────";
const DISTRIBUTION_WIDTH: usize = 30;

/// ヘッダー（タイトル＋背景情報）
pub fn header(mode: EvalMode, background: Option<&str>) -> String {
    let mut lines = vec![format!("💬 {}", mode.title())];
    match mode {
        EvalMode::Binary => lines.push("Evaluate each conversation turn as True or False".to_string()),
        EvalMode::Likert => {
            lines.push("Evaluate each conversation turn on a 1-5 Likert scale".to_string())
        }
    }
    if let Some(text) = background {
        lines.push(String::new());
        lines.push("## Background".to_string());
        lines.push(text.to_string());
    }
    lines.join("\n")
}

/// 評価ガイド（リッカートのみ）
pub fn rating_guide() -> String {
    let mut lines = vec!["📋 Rating Scale (1-5):".to_string()];
    for rating in Rating::all() {
        lines.push(format!(
            "  {} {} - {} ({})",
            rating,
            rating.emoji(),
            rating.label(),
            rating.description()
        ));
    }
    lines.join("\n")
}

pub fn summary(summary: &Summary) -> String {
    match summary {
        Summary::Binary(s) => binary_summary(s),
        Summary::Likert(s) => likert_summary(s),
    }
}

fn binary_summary(s: &BinarySummary) -> String {
    [
        "📊 Evaluation Summary".to_string(),
        format!(
            "  Total Turns: {}  |  Evaluated: {}  |  True: {} ({:.1}%)  |  False: {} ({:.1}%)",
            s.total,
            s.evaluated,
            s.true_count,
            s.true_percentage(),
            s.false_count,
            s.false_percentage()
        ),
    ]
    .join("\n")
}

fn likert_summary(s: &LikertSummary) -> String {
    let mut lines = vec![
        "📊 Evaluation Summary".to_string(),
        format!(
            "  Total Turns: {}  |  Evaluated: {}  |  Mean Rating: {}  |  Std Dev: {}  |  Median: {}",
            s.total,
            s.evaluated,
            format_stat(s.mean(), 2),
            format_stat(s.std_dev(), 2),
            format_stat(s.median(), 1)
        ),
    ];

    if s.evaluated > 0 {
        lines.push("  Rating Distribution:".to_string());
        let max = s.rating_counts.iter().copied().max().unwrap_or(0).max(1);
        for rating in Rating::all() {
            let count = s.count(rating);
            let bar = "█".repeat(count * DISTRIBUTION_WIDTH / max);
            lines.push(format!(
                "    Rating {}: {:>3} ({:>5.1}%) {}",
                rating,
                count,
                s.rating_percentage(rating),
                bar
            ));
        }
    }
    lines.join("\n")
}

/// 進捗バーを1回描画して残す
pub fn draw_progress(summary: &Summary) {
    let style = ProgressStyle::with_template("  [{bar:40.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::with_draw_target(
        Some(summary.total() as u64),
        ProgressDrawTarget::stdout(),
    )
    .with_style(style);
    bar.set_position(summary.evaluated() as u64);
    bar.abandon_with_message(summary.progress_text());
}

/// 現在行の表示
pub fn current_turn<J: Judgment>(session: &Session<J>) -> String {
    let row = session.current_row();
    let total = session.dataset().len();
    let status = match session.current_judgment() {
        Some(value) => value.status_label(),
        None => "Not evaluated yet".to_string(),
    };
    let note = session.current_note();

    let mut lines = vec![
        DIVIDER.to_string(),
        format!("Current Turn: {} / {}", session.current_index() + 1, total),
        format!("Turn {} of {}", row.turn_id, total),
        String::new(),
        "🗣️ Conversation".to_string(),
        format!("  Person A: {}", row.question),
        format!("  Person B: {}", row.answer),
        DIVIDER.to_string(),
        J::MODE.question().to_string(),
        format!("Current evaluation: {}", status),
    ];
    if !note.is_empty() {
        lines.push(format!("📝 Notes: {}", note));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use convo_eval_common::{Action, Dataset, EvaluationStore};

    const CSV: &str = "turn_id,personA_question,personB_answer\n7,Allergies?,Nuts\n8,Flavor?,Mint\n";

    #[test]
    fn test_likert_summary_placeholders() {
        let s = Summary::Likert(LikertSummary::compute(4, &EvaluationStore::new()));
        let text = summary(&s);
        assert!(text.contains("Mean Rating: N/A"));
        assert!(text.contains("Std Dev: N/A"));
        assert!(text.contains("Median: N/A"));
        assert!(!text.contains("Rating Distribution"));
    }

    #[test]
    fn test_likert_summary_values() {
        let ratings: Vec<Rating> = [5, 5, 4, 3, 1].iter().filter_map(|&v| Rating::new(v)).collect();
        let s = Summary::Likert(LikertSummary::from_ratings(5, &ratings));
        let text = summary(&s);
        assert!(text.contains("Mean Rating: 3.60"));
        assert!(text.contains("Std Dev: 1.50"));
        assert!(text.contains("Median: 4.0"));
        assert!(text.contains("Rating 2:   0 (  0.0%)"));
    }

    #[test]
    fn test_binary_summary_empty() {
        let s = Summary::Binary(BinarySummary::compute(3, &EvaluationStore::new()));
        let text = summary(&s);
        assert!(text.contains("True: 0 (0.0%)"));
        assert!(text.contains("False: 0 (0.0%)"));
    }

    #[test]
    fn test_current_turn() {
        let mut session = Session::<bool>::new(Dataset::from_csv_str(CSV).unwrap());
        let text = current_turn(&session);
        assert!(text.contains("Current Turn: 1 / 2"));
        assert!(text.contains("Turn 7 of 2"));
        assert!(text.contains("Person B: Nuts"));
        assert!(text.contains("Not evaluated yet"));

        session.apply(Action::Judge(false));
        session.apply(Action::SetNote("contradicts facts".into()));
        let text = current_turn(&session);
        assert!(text.contains("Current evaluation: False ❌"));
        assert!(text.contains("📝 Notes: contradicts facts"));
    }

    #[test]
    fn test_header_background() {
        assert!(header(EvalMode::Likert, Some("Facts")).contains("## Background\nFacts"));
        assert!(!header(EvalMode::Binary, None).contains("Background"));
    }

    #[test]
    fn test_rating_guide() {
        let guide = rating_guide();
        assert!(guide.contains("1 😞 - Very Poor"));
        assert!(guide.contains("5 😍 - Excellent"));
    }
}
