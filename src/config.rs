use crate::error::{EvalToolError, Result};
use convo_eval_common::{EvalMode, DEFAULT_BACKGROUND};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// エクスポート先フォルダ
    pub output_dir: PathBuf,
    /// CSV未指定時に読み込むファイル
    pub default_csv: PathBuf,
    pub default_mode: EvalMode,
    /// 評価したら次の未評価ターンへ進む
    pub auto_advance: bool,
    /// True/False モードでもクリア操作を表示する
    pub allow_clear_binary: bool,
    /// 背景情報（None で非表示）
    pub background: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EvalToolError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("convo-eval").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            default_csv: PathBuf::from("conversation_data.csv"),
            default_mode: EvalMode::Binary,
            auto_advance: false,
            allow_clear_binary: false,
            background: Some(DEFAULT_BACKGROUND.to_string()),
        }
    }

    /// クリア操作を表示するか
    pub fn surfaces_clear(&self, mode: EvalMode) -> bool {
        mode.surfaces_clear() || self.allow_clear_binary
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.output_dir = dir;
        self.save()
    }

    pub fn set_default_csv(&mut self, path: PathBuf) -> Result<()> {
        self.default_csv = path;
        self.save()
    }

    /// 背景情報をファイルから設定（空ファイルなら非表示）
    pub fn set_background_from_file(&mut self, path: &std::path::Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let text = text.trim();
        self.background = if text.is_empty() { None } else { Some(text.to_string()) };
        self.save()
    }
}
