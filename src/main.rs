use clap::Parser;
use convo_eval_common::{Dataset, EvalMode, Judgment, Rating};
use convo_eval_rust::annotate::{self, AnnotateOptions};
use convo_eval_rust::{cli, config, error, logging, render};
use cli::{Cli, Commands};
use config::Config;
use error::{EvalToolError, Result};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("⚠ {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Annotate { csv, mode, resume, output_dir, auto_advance, allow_clear } => {
            let mode = mode.unwrap_or(config.default_mode);
            let csv_path = annotate::resolve_dataset_path(csv.as_deref(), &config.default_csv)?;
            let options = AnnotateOptions {
                output_dir: output_dir.unwrap_or_else(|| config.output_dir.clone()),
                show_clear: allow_clear || config.surfaces_clear(mode),
                background: config.background.clone(),
            };
            let auto_advance = auto_advance || config.auto_advance;

            match mode {
                EvalMode::Binary => {
                    annotate_with::<bool>(&csv_path, resume.as_deref(), auto_advance, &options)?
                }
                EvalMode::Likert => {
                    annotate_with::<Rating>(&csv_path, resume.as_deref(), auto_advance, &options)?
                }
            }
        }

        Commands::Validate { csv } => {
            if !csv.exists() {
                return Err(EvalToolError::DatasetNotFound(csv));
            }
            let dataset = Dataset::from_csv_path(&csv)?;
            println!("✔ {}: {}ターン", csv.display(), dataset.len());
        }

        Commands::Summary { csv, evaluations, mode } => {
            match mode.unwrap_or(config.default_mode) {
                EvalMode::Binary => print_summary::<bool>(&csv, &evaluations)?,
                EvalMode::Likert => print_summary::<Rating>(&csv, &evaluations)?,
            }
        }

        Commands::Config { set_output_dir, set_default_csv, set_background, show } => {
            let mut config = config;

            if let Some(dir) = set_output_dir {
                config.set_output_dir(dir)?;
                println!("✔ エクスポート先を設定しました");
            }

            if let Some(path) = set_default_csv {
                config.set_default_csv(path)?;
                println!("✔ 既定のCSVを設定しました");
            }

            if let Some(path) = set_background {
                config.set_background_from_file(&path)?;
                println!("✔ 背景情報を設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  エクスポート先: {}", config.output_dir.display());
                println!("  既定のCSV: {}", config.default_csv.display());
                println!("  既定のモード: {}", config.default_mode);
                println!("  自動で次へ: {}", config.auto_advance);
                println!("  True/Falseでクリア表示: {}", config.allow_clear_binary);
                println!("  背景情報: {}", if config.background.is_some() { "設定済み" } else { "なし" });
            }
        }
    }

    Ok(())
}

fn annotate_with<J: Judgment>(
    csv_path: &Path,
    resume: Option<&Path>,
    auto_advance: bool,
    options: &AnnotateOptions,
) -> Result<()> {
    let (mut session, unknown) = annotate::load_session::<J>(csv_path, resume)?;
    if !unknown.is_empty() {
        println!("⚠ データセットに無いturn_idの評価を無視しました: {}", unknown.join(", "));
    }
    session.auto_advance = auto_advance;
    println!("✔ {}ターンを読み込みました\n", session.dataset().len());
    annotate::run(session, options)
}

fn print_summary<J: Judgment>(csv: &Path, evaluations: &Path) -> Result<()> {
    let (session, unknown) = annotate::load_session::<J>(csv, Some(evaluations))?;
    if !unknown.is_empty() {
        println!("⚠ データセットに無いturn_id: {}", unknown.join(", "));
    }
    let summary = session.summary();
    println!("{}", render::summary(&summary));
    println!("  {}", summary.progress_text());
    Ok(())
}
