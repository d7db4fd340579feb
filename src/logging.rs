//! ログ初期化
//!
//! 画面出力は `println!`、診断ログは `tracing` で標準エラーへ。
//! レベルは `RUST_LOG` が優先、未設定なら warn（`--verbose` で info）。

use crate::error::{EvalToolError, Result};
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| EvalToolError::Logging(e.to_string()))
}
