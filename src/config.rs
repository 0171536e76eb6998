use crate::error::{RecipeTagError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub exiftool_path: Option<String>,
    pub keyword_tag: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exiftool_path: None,
            keyword_tag: "Keywords".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
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
            .ok_or_else(|| RecipeTagError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("recipe-tag").join("config.json"))
    }

    /// exiftoolの起動コマンド（設定が無ければPATH上の "exiftool"）
    pub fn exiftool_command(&self) -> &str {
        self.exiftool_path.as_deref().unwrap_or("exiftool")
    }

    pub fn set_exiftool_path(&mut self, path: String) -> Result<()> {
        self.exiftool_path = Some(path);
        self.save()
    }

    pub fn set_keyword_tag(&mut self, tag: String) -> Result<()> {
        self.keyword_tag = tag;
        self.save()
    }
}
