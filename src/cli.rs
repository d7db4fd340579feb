use clap::{Parser, Subcommand};
use convo_eval_common::EvalMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "convo-eval")]
#[command(about = "会話ターン評価ツール（True/False・5段階リッカート）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSVを読み込んで対話的に評価
    Annotate {
        /// 会話CSV（省略時は設定の default_csv）
        csv: Option<PathBuf>,

        /// 評価モード (binary/likert)
        #[arg(short, long)]
        mode: Option<EvalMode>,

        /// 保存済み評価JSONから再開
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// エクスポート先フォルダ
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 評価したら次の未評価ターンへ進む
        #[arg(long)]
        auto_advance: bool,

        /// True/False モードでもクリア操作を表示
        #[arg(long)]
        allow_clear: bool,
    },

    /// CSVの列構成を検証
    Validate {
        /// 会話CSV
        #[arg(required = true)]
        csv: PathBuf,
    },

    /// 保存済み評価のサマリーを表示
    Summary {
        /// 会話CSV
        #[arg(required = true)]
        csv: PathBuf,

        /// 評価JSON
        #[arg(short, long, required = true)]
        evaluations: PathBuf,

        /// 評価モード (binary/likert)
        #[arg(short, long)]
        mode: Option<EvalMode>,
    },

    /// 設定を表示/編集
    Config {
        /// エクスポート先フォルダを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 既定のCSVを設定
        #[arg(long)]
        set_default_csv: Option<PathBuf>,

        /// 背景情報をテキストファイルから設定
        #[arg(long)]
        set_background: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
